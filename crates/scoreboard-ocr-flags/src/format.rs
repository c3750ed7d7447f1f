//! Compact RGB flag bitmaps.

use scoreboard_ocr_core::{ImageError, RgbaImage};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagFormatError {
    #[error("flag bitmap has zero size ({width}x{height})")]
    ZeroSize { width: usize, height: usize },

    #[error("flag bitmap {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },

    #[error("flag data has {got} bytes, expected {expected} (width*height*3)")]
    DataLength { expected: usize, got: usize },

    #[error("flag code is empty")]
    EmptyCode,

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Opaque RGB bitmap stored as `(width, height, [r, g, b, ...])`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbBitmap {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
}

impl RgbBitmap {
    pub fn decode(&self) -> Result<RgbaImage, FlagFormatError> {
        if self.width == 0 || self.height == 0 {
            return Err(FlagFormatError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(FlagFormatError::TooLarge {
                width: self.width,
                height: self.height,
            })?;
        if self.rgb.len() != expected {
            return Err(FlagFormatError::DataLength {
                expected,
                got: self.rgb.len(),
            });
        }
        let data = self
            .rgb
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect();
        Ok(RgbaImage::from_raw(self.width, self.height, data)?)
    }

    /// Drop alpha and pack the colour channels.
    pub fn from_image(image: &RgbaImage) -> Self {
        let rgb = image
            .as_raw()
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            rgb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_opaque_pixels() {
        let bmp = RgbBitmap {
            width: 2,
            height: 1,
            rgb: vec![10, 20, 30, 40, 50, 60],
        };
        let img = bmp.decode().expect("decode");
        assert_eq!(img.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(img.pixel(1, 0), Some([40, 50, 60, 255]));
        assert_eq!(RgbBitmap::from_image(&img), bmp);
    }

    #[test]
    fn rejects_bad_lengths() {
        let bmp = RgbBitmap {
            width: 2,
            height: 2,
            rgb: vec![0; 11],
        };
        assert_eq!(
            bmp.decode(),
            Err(FlagFormatError::DataLength {
                expected: 12,
                got: 11
            })
        );
        let zero = RgbBitmap {
            width: 0,
            height: 3,
            rgb: Vec::new(),
        };
        assert!(matches!(zero.decode(), Err(FlagFormatError::ZeroSize { .. })));
    }

    #[test]
    fn oversized_dimensions_are_an_error() {
        let bmp = RgbBitmap {
            width: usize::MAX / 2,
            height: 2,
            rgb: vec![0; 3],
        };
        assert_eq!(
            bmp.decode(),
            Err(FlagFormatError::TooLarge {
                width: usize::MAX / 2,
                height: 2
            })
        );
    }
}
