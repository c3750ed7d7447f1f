//! Line recognition for a single pixel-exact font.
//!
//! A [`GlyphCatalog`] holds one binary template per character, decoded from
//! a compact run-length format. [`LineRecognizer`] slides across a binarized
//! line, scores every template through the distance fields of both images
//! ([`score_glyph`]) and keeps the best one at each step.
//!
//! This is not general OCR: glyphs are compared at their native size, with
//! no scaling, rotation or learning.

mod ambiguity;
mod catalog;
mod glyph;
mod line;
mod score;
mod visit;

pub use ambiguity::AmbiguityProbes;
pub use catalog::{CatalogError, GlyphCatalog, GlyphCatalogFile, GlyphEntry};
pub use glyph::{GlyphFormatError, GlyphTemplate, RunLengthBitmap};
pub use line::{promote_capital_i, LineParams, LineRecognizer, LineResult};
pub use score::{
    glyph_features, place_glyph, score_glyph, GlyphFeatures, GlyphScore, GlyphScoreParams,
};
pub use visit::{MatchVisitor, OverlayPainter, PixelMatch};
