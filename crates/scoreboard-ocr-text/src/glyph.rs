//! Glyph templates and their compact run-length encoding.

use scoreboard_ocr_core::{ImageError, RgbaImage, ScanImage, BLACK, WHITE};
use serde::{Deserialize, Serialize};

/// Errors raised while decoding or building a glyph template.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphFormatError {
    #[error("glyph bitmap has zero size ({width}x{height})")]
    ZeroSize { width: usize, height: usize },

    #[error("glyph bitmap {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },

    #[error("run lengths cover {got} pixels, bitmap has {expected}")]
    RunLengthMismatch { expected: usize, got: usize },

    #[error("glyph label is empty")]
    EmptyLabel,

    #[error("glyph {label:?} has no foreground pixels")]
    Blank { label: String },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Binary bitmap stored as `(width, height, runs)`.
///
/// `runs` alternate background/foreground lengths over the row-major pixel
/// sequence, starting with background (which may be a zero-length run).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLengthBitmap {
    pub width: usize,
    pub height: usize,
    pub runs: Vec<u32>,
}

impl RunLengthBitmap {
    /// Expand into a binary buffer (white foreground on black).
    pub fn decode(&self) -> Result<RgbaImage, GlyphFormatError> {
        if self.width == 0 || self.height == 0 {
            return Err(GlyphFormatError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        let too_large = || GlyphFormatError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let expected = self.width.checked_mul(self.height).ok_or_else(too_large)?;
        let bytes = expected.checked_mul(4).ok_or_else(too_large)?;
        let got = self
            .runs
            .iter()
            .try_fold(0usize, |acc, &r| acc.checked_add(r as usize))
            .unwrap_or(usize::MAX);
        if got != expected {
            return Err(GlyphFormatError::RunLengthMismatch { expected, got });
        }

        let mut data = Vec::with_capacity(bytes);
        for (i, &run) in self.runs.iter().enumerate() {
            let color = if i % 2 == 0 { BLACK } else { WHITE };
            for _ in 0..run {
                data.extend_from_slice(&color);
            }
        }
        Ok(RgbaImage::from_raw(self.width, self.height, data)?)
    }

    /// Encode a binary buffer (foreground = non-zero red).
    pub fn from_image(image: &RgbaImage) -> Self {
        let mut runs = Vec::new();
        let mut current = false;
        let mut len = 0u32;
        for y in 0..image.height() as i32 {
            for x in 0..image.width() as i32 {
                let fg = image.is_foreground(x, y);
                if fg != current {
                    runs.push(len);
                    current = fg;
                    len = 0;
                }
                len += 1;
            }
        }
        runs.push(len);
        Self {
            width: image.width(),
            height: image.height(),
            runs,
        }
    }
}

/// One character of the font: label, analysed bitmap and the column
/// metrics the scorer needs.
#[derive(Clone, Debug)]
pub struct GlyphTemplate {
    label: String,
    scan: ScanImage,
    ink: usize,
    first_ink: usize,
    last_ink: usize,
    lead_run: usize,
    trail_run: usize,
    excluded: bool,
}

impl GlyphTemplate {
    /// Build a template from a binary bitmap. `excluded` keeps the glyph in
    /// the catalog but out of line scanning (duplicate or ambiguous shapes).
    pub fn new(
        label: impl Into<String>,
        bitmap: RgbaImage,
        excluded: bool,
    ) -> Result<Self, GlyphFormatError> {
        let label = label.into();
        if label.is_empty() {
            return Err(GlyphFormatError::EmptyLabel);
        }
        let scan = ScanImage::new(bitmap)?;
        let cols = scan.columns();
        let (Some(first_ink), Some(last_ink)) =
            (cols.next_filled(0), cols.prev_filled(scan.width() as i32 - 1))
        else {
            return Err(GlyphFormatError::Blank { label });
        };

        let lead_run = cols
            .next_empty(first_ink as i32)
            .unwrap_or(scan.width())
            - first_ink;
        let trail_run = (0..=last_ink)
            .rev()
            .take_while(|&x| cols.filling(x as i32) > 0.0)
            .count();
        let ink = scan.ink();

        Ok(Self {
            label,
            scan,
            ink,
            first_ink,
            last_ink,
            lead_run,
            trail_run,
            excluded,
        })
    }

    /// Decode a compact bitmap and build a template from it.
    pub fn from_run_length(
        label: impl Into<String>,
        bitmap: &RunLengthBitmap,
        excluded: bool,
    ) -> Result<Self, GlyphFormatError> {
        Self::new(label, bitmap.decode()?, excluded)
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn scan(&self) -> &ScanImage {
        &self.scan
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.scan.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.scan.height()
    }

    /// Foreground pixel count.
    #[inline]
    pub fn ink(&self) -> usize {
        self.ink
    }

    /// First column holding foreground.
    #[inline]
    pub fn first_ink(&self) -> usize {
        self.first_ink
    }

    /// Last column holding foreground.
    #[inline]
    pub fn last_ink(&self) -> usize {
        self.last_ink
    }

    /// Consecutive filled columns starting at [`Self::first_ink`].
    #[inline]
    pub fn lead_run(&self) -> usize {
        self.lead_run
    }

    /// Consecutive filled columns ending at [`Self::last_ink`].
    #[inline]
    pub fn trail_run(&self) -> usize {
        self.trail_run
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }
}
