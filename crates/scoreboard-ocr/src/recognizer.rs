//! Region-level recognition: binarize, build caches, run one matcher.

use scoreboard_ocr_core::{binarize, BinarizeParams, ImageError, RgbaImage, ScanImage};
use scoreboard_ocr_digits::{recognize_score, DigitLayout};
use scoreboard_ocr_flags::{FlagCatalog, FlagError, FlagMatcher, FlagParams};
use scoreboard_ocr_text::{GlyphCatalog, LineParams, LineRecognizer, LineResult, MatchVisitor};
use serde::{Deserialize, Serialize};

/// Errors for malformed regions. A region that simply holds nothing
/// recognizable is not an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizeError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Flag(#[from] FlagError),
}

/// Every tunable of the three recognizers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerParams {
    /// Binarization of name regions.
    pub text: BinarizeParams,
    /// Binarization of score regions.
    pub digits: BinarizeParams,
    pub line: LineParams,
    pub digit_layout: DigitLayout,
    pub flag: FlagParams,
}

/// Read one line of text from a colour region.
pub fn read_line<V: MatchVisitor + ?Sized>(
    lines: &LineRecognizer,
    params: &BinarizeParams,
    region: &RgbaImage,
    visitor: &mut V,
) -> Result<LineResult, ImageError> {
    let scan = ScanImage::new(binarize(region, params))?;
    Ok(lines.recognize_with(&scan, visitor))
}

/// Read a score from a colour region.
pub fn read_score(
    layout: &DigitLayout,
    params: &BinarizeParams,
    region: &RgbaImage,
) -> Result<u64, ImageError> {
    let scan = ScanImage::new(binarize(region, params))?;
    Ok(recognize_score(&scan, layout))
}

/// Flag code of a region, or an empty string when nothing matches well
/// enough.
pub fn read_flag(matcher: &FlagMatcher, region: &RgbaImage) -> Result<String, FlagError> {
    Ok(matcher
        .recognize(region)?
        .map(|m| m.code)
        .unwrap_or_default())
}

/// The three recognizers with their catalogs, built once and shared.
#[derive(Clone, Debug)]
pub struct Recognizer {
    lines: LineRecognizer,
    flags: FlagMatcher,
    params: RecognizerParams,
}

impl Recognizer {
    pub fn new(glyphs: GlyphCatalog, flags: FlagCatalog, params: RecognizerParams) -> Self {
        let lines = LineRecognizer::new(glyphs, params.line.clone());
        let flags = FlagMatcher::new(flags, params.flag);
        Self {
            lines,
            flags,
            params,
        }
    }

    pub fn params(&self) -> &RecognizerParams {
        &self.params
    }

    pub fn line_recognizer(&self) -> &LineRecognizer {
        &self.lines
    }

    pub fn flag_matcher(&self) -> &FlagMatcher {
        &self.flags
    }

    pub fn recognize_line(&self, region: &RgbaImage) -> Result<LineResult, RecognizeError> {
        self.recognize_line_with(region, &mut ())
    }

    /// [`Self::recognize_line`] with a diagnostic visitor.
    pub fn recognize_line_with<V: MatchVisitor + ?Sized>(
        &self,
        region: &RgbaImage,
        visitor: &mut V,
    ) -> Result<LineResult, RecognizeError> {
        Ok(read_line(&self.lines, &self.params.text, region, visitor)?)
    }

    pub fn recognize_digits(&self, region: &RgbaImage) -> Result<u64, RecognizeError> {
        Ok(read_score(
            &self.params.digit_layout,
            &self.params.digits,
            region,
        )?)
    }

    pub fn recognize_flag(&self, region: &RgbaImage) -> Result<String, RecognizeError> {
        Ok(read_flag(&self.flags, region)?)
    }
}
