//! Core buffers and caches for template-matching recognition of fixed-layout
//! game screenshots.
//!
//! - [`RgbaImage`]: bounds-checked RGBA grid plus crop/stretch/letterbox/displace.
//! - [`binarize`]: reference-colour thresholding into a pure black/white buffer.
//! - [`DistanceField`] / [`ColumnStats`]: per-buffer caches used by every matcher.
//! - [`ScanImage`]: an immutable buffer bundled with both caches.
//!
//! Nothing here performs I/O; decoding images is left to callers.

mod binarize;
mod field;
mod image;
mod logger;
mod scan;

pub use binarize::{binarize, binarize_in_place, color_proximity, BinarizeParams};
pub use field::{ColumnStats, DistanceField, FAR, MAX_RADIUS};
pub use image::{sample_bilinear_rgba, ImageError, PixelRect, RgbaImage, BLACK, CLEAR, WHITE};
pub use scan::ScanImage;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
