//! Optional diagnostics for accepted glyph matches.

use crate::glyph::GlyphTemplate;
use scoreboard_ocr_core::{RgbaImage, ScanImage};

/// How one pixel of an accepted match compares between target and glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelMatch {
    /// Foreground in both.
    Matched,
    /// Foreground in the glyph only.
    GlyphOnly,
    /// Foreground in the target only.
    TargetOnly,
}

/// Receives per-pixel comparisons for every glyph the line scanner accepts.
/// Recognition never depends on what the visitor does.
pub trait MatchVisitor {
    fn visit(&mut self, x: i32, y: i32, kind: PixelMatch);
}

/// Discards everything.
impl MatchVisitor for () {
    #[inline]
    fn visit(&mut self, _x: i32, _y: i32, _kind: PixelMatch) {}
}

/// Paints comparisons onto a copy of the line: green for matched pixels,
/// red for glyph-only, blue for target-only.
#[derive(Clone, Debug)]
pub struct OverlayPainter {
    image: RgbaImage,
}

impl OverlayPainter {
    pub const MATCHED: [u8; 4] = [0, 200, 0, 255];
    pub const GLYPH_ONLY: [u8; 4] = [220, 0, 0, 255];
    pub const TARGET_ONLY: [u8; 4] = [0, 80, 255, 255];

    pub fn new(base: &RgbaImage) -> Self {
        Self {
            image: base.clone(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl MatchVisitor for OverlayPainter {
    fn visit(&mut self, x: i32, y: i32, kind: PixelMatch) {
        let color = match kind {
            PixelMatch::Matched => Self::MATCHED,
            PixelMatch::GlyphOnly => Self::GLYPH_ONLY,
            PixelMatch::TargetOnly => Self::TARGET_ONLY,
        };
        self.image.put_pixel(x, y, color);
    }
}

/// Feed the comparison of `glyph` placed at column `x` to `visitor`.
pub(crate) fn report_match<V: MatchVisitor + ?Sized>(
    target: &ScanImage,
    glyph: &GlyphTemplate,
    x: i32,
    visitor: &mut V,
) {
    let rows = target.height().max(glyph.height()) as i32;
    for y in 0..rows {
        for gx in 0..glyph.width() as i32 {
            let tx = x + gx;
            let kind = match (target.is_foreground(tx, y), glyph.scan().is_foreground(gx, y)) {
                (true, true) => PixelMatch::Matched,
                (false, true) => PixelMatch::GlyphOnly,
                (true, false) => PixelMatch::TargetOnly,
                (false, false) => continue,
            };
            visitor.visit(tx, y, kind);
        }
    }
}
