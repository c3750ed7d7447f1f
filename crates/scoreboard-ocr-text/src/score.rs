//! Scoring one glyph template against a line at a pen position.
//!
//! The score is a fixed weighted sum of distance-field features. There is no
//! area normalisation: wider and inkier glyphs earn proportionally more
//! bonus, which keeps "m" from being read as "rn".

use crate::glyph::GlyphTemplate;
use scoreboard_ocr_core::ScanImage;
use serde::{Deserialize, Serialize};

/// Weights and acceptance limits for [`score_glyph`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphScoreParams {
    /// Penalty on `max_distance^1.5`, applied to both lookup directions.
    pub max_distance_weight: f32,
    /// Penalty on summed distances, both lookup directions.
    pub sum_distance_weight: f32,
    /// Penalty per pixel whose foreground-ness disagrees.
    pub mismatch_weight: f32,
    /// Penalty on mean per-column fill difference.
    pub fill_weight: f32,
    /// Glyphs narrower than this skip the fill term.
    pub min_fill_width: usize,
    /// Bonus per glyph column.
    pub ink_width_bonus: f32,
    /// Weight of `1 / (1 + |width error|)`.
    pub width_match_weight: f32,
    /// Glyphs narrower than this get `±narrow_match_bonus`.
    pub narrow_width: usize,
    pub narrow_match_bonus: f32,
    /// Bonus per glyph foreground pixel.
    pub ink_weight: f32,
    /// Distance at or below which a cell counts as foreground.
    pub foreground_distance: f32,
    /// Shortest leading/trailing filled-column run accepted without a
    /// matching short run in the glyph.
    pub min_run: usize,
    /// Longest filled stretch before the next empty column.
    pub max_empty_gap: usize,
}

impl Default for GlyphScoreParams {
    fn default() -> Self {
        Self {
            max_distance_weight: 2.0,
            sum_distance_weight: 0.35,
            mismatch_weight: 0.5,
            fill_weight: 8.0,
            min_fill_width: 5,
            ink_width_bonus: 1.5,
            width_match_weight: 6.0,
            narrow_width: 5,
            narrow_match_bonus: 2.0,
            ink_weight: 0.05,
            foreground_distance: 1.0,
            min_run: 2,
            max_empty_gap: 80,
        }
    }
}

/// Raw features of one placement, before weighting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphFeatures {
    /// Glyph foreground looked up in the target field.
    pub glyph_sum: f32,
    pub glyph_max: f32,
    /// Target foreground in the window looked up in the glyph field.
    pub target_sum: f32,
    pub target_max: f32,
    pub mismatches: usize,
    pub fill_diff: f32,
    pub width_match: f32,
    pub width: usize,
    pub ink: usize,
}

impl GlyphFeatures {
    /// Weighted combination; higher is better.
    pub fn score(&self, p: &GlyphScoreParams) -> f32 {
        let mut s = -p.max_distance_weight
            * (self.glyph_max.powf(1.5) + self.target_max.powf(1.5))
            - p.sum_distance_weight * (self.glyph_sum + self.target_sum)
            - p.mismatch_weight * self.mismatches as f32
            - p.fill_weight * self.fill_diff
            + p.ink_width_bonus * self.width as f32
            + p.width_match_weight * self.width_match
            + p.ink_weight * self.ink as f32;
        if self.width < p.narrow_width {
            if self.width_match > 0.5 {
                s += p.narrow_match_bonus;
            } else {
                s -= p.narrow_match_bonus;
            }
        }
        s
    }
}

/// A scored placement: glyph left edge `x` in target columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphScore {
    pub x: i32,
    pub score: f32,
    pub features: GlyphFeatures,
}

/// Where `glyph` would sit when scanning from `pen`, or `None` when the
/// placement is rejected outright.
///
/// The glyph's first ink column is aligned with the first filled target
/// column at or after `pen`.
pub fn place_glyph(
    target: &ScanImage,
    glyph: &GlyphTemplate,
    pen: i32,
    params: &GlyphScoreParams,
) -> Option<(i32, usize)> {
    let cols = target.columns();
    let start = cols.next_filled(pen)?;
    let x = start as i32 - glyph.first_ink() as i32;

    let trailing = x + glyph.last_ink() as i32;
    if trailing >= target.width() as i32 {
        return None;
    }
    let trail_col = cols.prev_filled(trailing)?;

    let empty = cols.next_empty(start as i32)?;
    let lead_run = empty - start;
    if lead_run > params.max_empty_gap {
        return None;
    }
    if lead_run < params.min_run && glyph.lead_run() >= params.min_run {
        return None;
    }

    let trail_run = (0..=trail_col)
        .rev()
        .take(params.min_run)
        .take_while(|&c| cols.filling(c as i32) > 0.0)
        .count();
    if trail_run < params.min_run && glyph.trail_run() >= params.min_run {
        return None;
    }

    Some((x, empty))
}

/// Compute the raw features of `glyph` placed with its left edge at `x`.
/// `empty` is the first empty target column after the glyph's start.
pub fn glyph_features(
    target: &ScanImage,
    glyph: &GlyphTemplate,
    x: i32,
    empty: usize,
    params: &GlyphScoreParams,
) -> GlyphFeatures {
    let tf = target.field();
    let gf = glyph.scan().field();
    let (gw, gh) = (glyph.width() as i32, glyph.height() as i32);
    let th = target.height() as i32;

    let mut f = GlyphFeatures {
        width: glyph.width(),
        ink: glyph.ink(),
        ..GlyphFeatures::default()
    };

    for gy in 0..gh {
        for gx in 0..gw {
            if !glyph.scan().is_foreground(gx, gy) {
                continue;
            }
            let d = tf.get(x + gx, gy);
            f.glyph_sum += d;
            f.glyph_max = f.glyph_max.max(d);
        }
    }

    for y in 0..th {
        for gx in 0..gw {
            let tx = x + gx;
            let td = tf.get(tx, y);
            let gd = gf.get(gx, y);
            if target.is_foreground(tx, y) {
                f.target_sum += gd;
                f.target_max = f.target_max.max(gd);
            }
            if (td <= params.foreground_distance) != (gd <= params.foreground_distance) {
                f.mismatches += 1;
            }
        }
    }

    if glyph.width() >= params.min_fill_width {
        let gcols = glyph.scan().columns();
        let total: f32 = (0..gw)
            .map(|gx| (target.columns().filling(x + gx) - gcols.filling(gx)).abs())
            .sum();
        f.fill_diff = total / gw as f32;
    }

    let width_error = (empty as i32 - x - gw).unsigned_abs();
    f.width_match = 1.0 / (1.0 + width_error as f32);

    f
}

/// Score `glyph` against `target` scanning from `pen`. `None` means the
/// placement was rejected.
pub fn score_glyph(
    target: &ScanImage,
    glyph: &GlyphTemplate,
    pen: i32,
    params: &GlyphScoreParams,
) -> Option<GlyphScore> {
    let (x, empty) = place_glyph(target, glyph, pen, params)?;
    let features = glyph_features(target, glyph, x, empty, params);
    Some(GlyphScore {
        x,
        score: features.score(params),
        features,
    })
}
