//! Digit and score recognition by segment sampling.

use crate::layout::{pattern_score, DigitLayout, Segment};
use scoreboard_ocr_core::{PixelRect, ScanImage};

/// Best digit for one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitMatch {
    pub digit: u8,
    pub score: f32,
    /// Jitter offset the digit was read at.
    pub offset: i32,
}

/// Fill ratio of every segment for a slot whose left edge is `x`.
pub fn segment_fills(target: &ScanImage, layout: &DigitLayout, x: i32) -> [f32; 8] {
    Segment::ALL.map(|s| target.fill_ratio(layout.segment(s).offset(x, 0)))
}

/// Read the digit in the slot starting at column `slot_x`.
///
/// Every jitter offset is combined with every digit; the single best
/// combination wins and ties keep the first one encountered (offsets in
/// layout order, digits ascending). `None` only when the layout has no
/// jitter offsets.
pub fn recognize_digit(
    target: &ScanImage,
    layout: &DigitLayout,
    slot_x: i32,
) -> Option<DigitMatch> {
    let mut best: Option<DigitMatch> = None;
    for &offset in &layout.jitter {
        let fills = segment_fills(target, layout, slot_x + offset);
        for digit in 0..10u8 {
            let score = pattern_score(digit, &fills, layout.one_bias);
            if best.map_or(true, |b| score > b.score) {
                best = Some(DigitMatch {
                    digit,
                    score,
                    offset,
                });
            }
        }
    }
    best
}

/// Read the whole score field.
///
/// Returns `0` when the top strip is inked (the row shows something other
/// than a score). Otherwise slots are read right to left from the right
/// edge; blank slots are skipped and every digit read takes the next decimal
/// place.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = target.width(), height = target.height())
    )
)]
pub fn recognize_score(target: &ScanImage, layout: &DigitLayout) -> u64 {
    let width = target.width();
    let strip = PixelRect::new(0, 0, width, layout.top_strip_rows.min(target.height()));
    let strip_fill = target.fill_ratio(strip);
    if strip_fill > layout.top_strip_max_fill {
        log::debug!("score crop top strip {:.3} filled, no score", strip_fill);
        return 0;
    }
    if layout.slot_width == 0 {
        return 0;
    }

    let mut value = 0u64;
    let mut place = 1u64;
    let mut right = width;
    while right >= layout.slot_width {
        let slot_x = (right - layout.slot_width) as i32;
        right -= layout.slot_width;

        let slot = PixelRect::new(slot_x, 0, layout.slot_width, target.height());
        if target.fill_ratio(slot) < layout.blank_slot_max_fill {
            continue;
        }
        let Some(m) = recognize_digit(target, layout, slot_x) else {
            break;
        };
        log::trace!(
            "slot x={} digit {} (offset {}, score {:.3})",
            slot_x,
            m.digit,
            m.offset,
            m.score
        );
        value = value.saturating_add(u64::from(m.digit).saturating_mul(place));
        place = place.saturating_mul(10);
    }
    log::debug!("score read {}", value);
    value
}
