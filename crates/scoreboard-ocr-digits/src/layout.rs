//! Digit slot geometry and the ten segment patterns.

use scoreboard_ocr_core::PixelRect;
use serde::{Deserialize, Serialize};

/// The eight probed segments, in sampling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Top,
    UpperLeft,
    UpperRight,
    Middle,
    LowerLeft,
    LowerRight,
    Bottom,
    /// Centre stroke of a `1`.
    Vertical,
}

impl Segment {
    pub const ALL: [Segment; 8] = [
        Segment::Top,
        Segment::UpperLeft,
        Segment::UpperRight,
        Segment::Middle,
        Segment::LowerLeft,
        Segment::LowerRight,
        Segment::Bottom,
        Segment::Vertical,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Lit segments per digit, indexed by [`Segment::index`].
pub const DIGIT_PATTERNS: [[bool; 8]; 10] = {
    const X: bool = true;
    const O: bool = false;
    [
        // top  ul  ur  mid  ll  lr  bot  vert
        [X, X, X, O, X, X, X, O], // 0
        [O, O, O, O, O, O, O, X], // 1
        [X, O, X, X, X, O, X, O], // 2
        [X, O, X, X, O, X, X, O], // 3
        [O, X, X, X, O, X, O, O], // 4
        [X, X, O, X, O, X, X, O], // 5
        [X, X, O, X, X, X, X, O], // 6
        [X, O, X, O, O, X, O, O], // 7
        [X, X, X, X, X, X, X, O], // 8
        [X, X, X, X, O, X, X, O], // 9
    ]
};

/// Geometry of the score field.
///
/// Segment rectangles are relative to the slot's left edge (plus jitter) and
/// the top row of the score crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitLayout {
    pub slot_width: usize,
    /// Horizontal offsets tried for every slot, in tie-break order.
    pub jitter: Vec<i32>,
    /// Subtracted from the `1` score.
    pub one_bias: f32,
    pub top_strip_rows: usize,
    /// A score crop whose top strip is fuller than this holds no score.
    pub top_strip_max_fill: f32,
    /// Slots filled below this ratio are blank.
    pub blank_slot_max_fill: f32,
    /// Sampling rectangles, indexed by [`Segment::index`].
    pub segments: [PixelRect; 8],
}

impl Default for DigitLayout {
    fn default() -> Self {
        Self {
            slot_width: 18,
            jitter: vec![-1, 0, 1, 2, 3],
            one_bias: 2.5,
            top_strip_rows: 5,
            top_strip_max_fill: 0.10,
            blank_slot_max_fill: 0.01,
            segments: [
                PixelRect::new(5, 6, 2, 3),
                PixelRect::new(1, 10, 3, 4),
                PixelRect::new(14, 10, 3, 4),
                PixelRect::new(5, 16, 2, 3),
                PixelRect::new(1, 20, 3, 4),
                PixelRect::new(14, 20, 3, 4),
                PixelRect::new(5, 25, 2, 3),
                PixelRect::new(9, 10, 3, 4),
            ],
        }
    }
}

impl DigitLayout {
    #[inline]
    pub fn segment(&self, segment: Segment) -> PixelRect {
        self.segments[segment.index()]
    }
}

/// Score a digit pattern against sampled segment fills: every lit segment
/// contributes its fill, every unlit one `1 - fill`. The `1` pattern pays
/// `one_bias` so it wins only on a lone centre stroke.
pub fn pattern_score(digit: u8, fills: &[f32; 8], one_bias: f32) -> f32 {
    let pattern = &DIGIT_PATTERNS[usize::from(digit % 10)];
    let raw: f32 = pattern
        .iter()
        .zip(fills)
        .map(|(&lit, &fill)| if lit { fill } else { 1.0 - fill })
        .sum();
    if digit == 1 {
        raw - one_bias
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn patterns_are_distinct() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(DIGIT_PATTERNS[a], DIGIT_PATTERNS[b], "{a} vs {b}");
            }
        }
    }

    #[test]
    fn exact_fills_score_eight() {
        for digit in 0..10u8 {
            let fills = DIGIT_PATTERNS[digit as usize].map(|lit| if lit { 1.0 } else { 0.0 });
            let expected = if digit == 1 { 8.0 - 2.5 } else { 8.0 };
            assert_abs_diff_eq!(pattern_score(digit, &fills, 2.5), expected);
        }
    }

    #[test]
    fn empty_segments_do_not_favour_one_beyond_bias() {
        let bias = DigitLayout::default().one_bias;
        let empty = [0.0f32; 8];
        let one = pattern_score(1, &empty, bias);
        let seven = pattern_score(7, &empty, bias);
        assert!(one - seven <= bias, "one={one} seven={seven}");
        assert!(one < seven);
    }

    #[test]
    fn default_segments_do_not_overlap() {
        let layout = DigitLayout::default();
        for (i, a) in layout.segments.iter().enumerate() {
            for b in &layout.segments[i + 1..] {
                let disjoint = a.right() <= b.x
                    || b.right() <= a.x
                    || a.bottom() <= b.y
                    || b.bottom() <= a.y;
                assert!(disjoint, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn partial_layout_json_keeps_defaults() {
        let layout: DigitLayout = serde_json::from_str(r#"{ "slot_width": 20 }"#).expect("json");
        assert_eq!(layout.slot_width, 20);
        assert_eq!(layout.jitter, vec![-1, 0, 1, 2, 3]);
    }
}
