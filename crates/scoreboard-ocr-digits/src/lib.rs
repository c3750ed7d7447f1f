//! Score digits read by segment sampling.
//!
//! Scores use a blocky font close to a seven-segment display, so instead of
//! per-digit bitmaps each fixed-width slot is probed at eight rectangles
//! ([`Segment`]) and the fill ratios are compared against ten hand-written
//! patterns. A narrow centre stroke stands in for the usual right-hand pair
//! of a `1`.
//!
//! ```
//! use scoreboard_ocr_core::{RgbaImage, ScanImage, BLACK};
//! use scoreboard_ocr_digits::{recognize_score, DigitLayout};
//!
//! let blank = ScanImage::new(RgbaImage::filled(72, 30, BLACK)).unwrap();
//! assert_eq!(recognize_score(&blank, &DigitLayout::default()), 0);
//! ```

mod layout;
mod recognize;

pub use layout::{pattern_score, DigitLayout, Segment, DIGIT_PATTERNS};
pub use recognize::{recognize_digit, recognize_score, segment_fills, DigitMatch};
