//! Colour-proximity binarization.

use crate::image::{RgbaImage, BLACK, WHITE};
use serde::{Deserialize, Serialize};

/// Reference colour and proximity threshold for [`binarize`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Ink colour of the text being isolated.
    pub reference: [u8; 3],
    /// Pixels with proximity strictly above this become white.
    pub threshold: f32,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            reference: [255, 255, 255],
            threshold: 0.75,
        }
    }
}

/// `1 - mean(|Δr|, |Δg|, |Δb|) / 255`, clamped to `[0, 1]`.
#[inline]
pub fn color_proximity(a: [u8; 3], b: [u8; 3]) -> f32 {
    let diff: u32 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum();
    (1.0 - diff as f32 / (3.0 * 255.0)).clamp(0.0, 1.0)
}

#[inline]
fn classify(pixel: [u8; 4], params: &BinarizeParams) -> [u8; 4] {
    if color_proximity([pixel[0], pixel[1], pixel[2]], params.reference) > params.threshold {
        WHITE
    } else {
        BLACK
    }
}

/// Map `region` to pure black/white: white where the pixel is close to
/// `params.reference`, black elsewhere. Alpha is always opaque.
pub fn binarize(region: &RgbaImage, params: &BinarizeParams) -> RgbaImage {
    let mut out = region.clone();
    binarize_in_place(&mut out, params);
    out
}

/// In-place variant of [`binarize`], for annotating a buffer that is about
/// to be displayed.
pub fn binarize_in_place(region: &mut RgbaImage, params: &BinarizeParams) {
    for y in 0..region.height() as i32 {
        for x in 0..region.width() as i32 {
            let p = region.pixel_or_clear(x, y);
            region.put_pixel(x, y, classify(p, params));
        }
    }
}
