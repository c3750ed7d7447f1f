//! Left-to-right line scanning.
//!
//! The scanner keeps a pen column. At each step it scores every active glyph
//! at the first filled column near the pen (pen-1, pen, pen+1), keeps the
//! single best placement, appends its label and moves the pen past it.
//! Scanning stops as soon as no glyph can be placed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ambiguity::AmbiguityProbes;
use crate::catalog::GlyphCatalog;
use crate::glyph::GlyphTemplate;
use crate::score::{score_glyph, GlyphScore, GlyphScoreParams};
use crate::visit::{report_match, MatchVisitor};
use scoreboard_ocr_core::ScanImage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    pub score: GlyphScoreParams,
    pub ambiguity: AmbiguityProbes,
    /// Pen offsets tried at every step, in tie-break order.
    pub skips: Vec<i32>,
    /// A jump from the pen wider than this inserts a space.
    pub space_gap: i32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            score: GlyphScoreParams::default(),
            ambiguity: AmbiguityProbes::default(),
            skips: vec![-1, 0, 1],
            space_gap: 6,
        }
    }
}

/// Recognized text and its confidence: the mean score of the accepted
/// glyphs, `0` for an empty line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    pub text: String,
    pub confidence: f32,
}

impl LineResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    index: usize,
    placement: GlyphScore,
}

/// Reads a line of the catalog's font.
#[derive(Clone, Debug)]
pub struct LineRecognizer {
    catalog: GlyphCatalog,
    params: LineParams,
}

impl LineRecognizer {
    pub fn new(catalog: GlyphCatalog, params: LineParams) -> Self {
        Self { catalog, params }
    }

    pub fn catalog(&self) -> &GlyphCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &LineParams {
        &self.params
    }

    /// Recognize `target`, a binary line buffer.
    pub fn recognize(&self, target: &ScanImage) -> LineResult {
        self.recognize_with(target, &mut ())
    }

    /// Like [`Self::recognize`], reporting every accepted match to `visitor`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(width = target.width(), height = target.height())
        )
    )]
    pub fn recognize_with<V: MatchVisitor + ?Sized>(
        &self,
        target: &ScanImage,
        visitor: &mut V,
    ) -> LineResult {
        let mut pen = 0i32;
        let mut text = String::new();
        let mut total = 0.0f32;
        let mut accepted = 0usize;

        while let Some(best) = self.best_candidate(target, pen) {
            let glyph = &self.catalog.glyphs()[best.index];
            let x = best.placement.x;
            let label = self.resolve_label(target, glyph, x);

            if !text.is_empty() && x - pen > self.params.space_gap {
                text.push(' ');
            }
            text.push_str(label);
            log::trace!(
                "glyph {:?} as {:?} at x={} score={:.3}",
                glyph.label(),
                label,
                x,
                best.placement.score
            );

            report_match(target, glyph, x, visitor);
            total += best.placement.score;
            accepted += 1;
            pen = (x + glyph.width() as i32 + 1).max(pen + 1);
        }

        let confidence = if accepted == 0 {
            0.0
        } else {
            total / accepted as f32
        };
        let text = promote_capital_i(&text);
        log::debug!("line read {:?} (confidence {:.3})", text, confidence);
        LineResult { text, confidence }
    }

    /// Best placement over all skips and active glyphs; the first one wins
    /// ties.
    fn best_candidate(&self, target: &ScanImage, pen: i32) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for &skip in &self.params.skips {
            for cand in self.score_all(target, pen + skip) {
                if best.map_or(true, |b| cand.placement.score > b.placement.score) {
                    best = Some(cand);
                }
            }
        }
        best
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, target: &ScanImage, pen: i32) -> Vec<Candidate> {
        self.catalog
            .active()
            .filter_map(|(index, glyph)| {
                score_glyph(target, glyph, pen, &self.params.score)
                    .map(|placement| Candidate { index, placement })
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, target: &ScanImage, pen: i32) -> Vec<Candidate> {
        let active: Vec<(usize, &GlyphTemplate)> = self.catalog.active().collect();
        active
            .par_iter()
            .filter_map(|&(index, glyph)| {
                score_glyph(target, glyph, pen, &self.params.score)
                    .map(|placement| Candidate { index, placement })
            })
            .collect()
    }

    fn resolve_label<'a>(&self, target: &ScanImage, glyph: &'a GlyphTemplate, x: i32) -> &'a str {
        let probes = &self.params.ambiguity;
        if !probes.applies_to(glyph.label()) {
            return glyph.label();
        }
        let x0 = x + glyph.first_ink() as i32;
        let x1 = x + glyph.last_ink() as i32;
        probes.resolve(target, x0, x1)
    }
}

/// Replace `l` with `I` when it opens the text or sits between two
/// uppercase letters.
pub fn promote_capital_i(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c != 'l' {
                return c;
            }
            let opens = i == 0;
            let between_capitals = i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_uppercase()
                && chars[i + 1].is_uppercase();
            if opens || between_capitals {
                'I'
            } else {
                c
            }
        })
        .collect()
}
