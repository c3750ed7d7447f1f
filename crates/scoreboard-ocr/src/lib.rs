//! High-level facade crate for the `scoreboard-ocr-*` workspace.
//!
//! This crate provides:
//! - re-exports of the buffer, text, digit and flag crates
//! - [`Recognizer`]: the three recognizers with injected catalogs
//! - whole-screen scanning driven by a JSON [`ScreenConfig`]
//! - (feature `image`) adapters to and from `image` buffers and files
//!
//! ## Quickstart
//!
//! ```no_run
//! use scoreboard_ocr::{convert, scan_screen, ScreenConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ScreenConfig::load_json("screen.json")?;
//! let recognizer = cfg.build_recognizer(Path::new("."))?;
//! let screen = convert::load_rgba("round_1.png")?;
//! for player in scan_screen(&recognizer, &screen, &cfg.layout)? {
//!     println!("{} [{}] {}", player.name, player.flag, player.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `scoreboard_ocr::core`: RGBA buffers, binarization, distance fields.
//! - `scoreboard_ocr::text`: glyph catalogs and line recognition.
//! - `scoreboard_ocr::digits`: segment-sampled score digits.
//! - `scoreboard_ocr::flags`: flag catalogs and colour matching.
//! - `scoreboard_ocr::convert` (feature `image`): `image` crate adapters.

pub use scoreboard_ocr_core as core;
pub use scoreboard_ocr_digits as digits;
pub use scoreboard_ocr_flags as flags;
pub use scoreboard_ocr_text as text;

pub use scoreboard_ocr_core::{BinarizeParams, PixelRect, RgbaImage, ScanImage};
pub use scoreboard_ocr_digits::DigitLayout;
pub use scoreboard_ocr_flags::{FlagCatalog, FlagParams};
pub use scoreboard_ocr_text::{GlyphCatalog, LineParams, LineResult, OverlayPainter};

mod config;
mod recognizer;
mod screen;

pub use config::{
    ConfigError, ConfigIoError, PlayerRecord, RowLayout, ScanReport, ScreenConfig, ScreenLayout,
};
pub use recognizer::{
    read_flag, read_line, read_score, RecognizeError, Recognizer, RecognizerParams,
};
pub use screen::{normalize_screen, scan_row, scan_screen};

#[cfg(feature = "image")]
pub mod convert;
