//! Immutable binary buffer bundled with its derived caches.

use crate::field::{ColumnStats, DistanceField};
use crate::image::{ImageError, PixelRect, RgbaImage};

/// A binary buffer together with its [`DistanceField`] and [`ColumnStats`].
///
/// The caches are computed once in the constructor and the buffer cannot be
/// mutated afterwards, so they never go stale. To annotate a buffer, clone
/// it out with [`ScanImage::image`] first.
#[derive(Clone, Debug)]
pub struct ScanImage {
    image: RgbaImage,
    restrict: Option<PixelRect>,
    field: DistanceField,
    columns: ColumnStats,
}

impl ScanImage {
    /// Analyse `image`. Zero-area buffers are rejected.
    pub fn new(image: RgbaImage) -> Result<Self, ImageError> {
        Self::build(image, None)
    }

    /// Analyse `image`, letting only foreground inside `restrict` contribute
    /// to the distance field.
    pub fn with_restriction(image: RgbaImage, restrict: PixelRect) -> Result<Self, ImageError> {
        Self::build(image, Some(restrict))
    }

    fn build(image: RgbaImage, restrict: Option<PixelRect>) -> Result<Self, ImageError> {
        if image.is_empty() {
            return Err(ImageError::ZeroDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        let field = DistanceField::compute(&image, restrict);
        let columns = ColumnStats::compute(&image);
        Ok(Self {
            image,
            restrict,
            field,
            columns,
        })
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub fn restriction(&self) -> Option<PixelRect> {
        self.restrict
    }

    #[inline]
    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    #[inline]
    pub fn columns(&self) -> &ColumnStats {
        &self.columns
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    #[inline]
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        self.image.is_foreground(x, y)
    }

    /// Number of foreground pixels in the whole buffer.
    pub fn ink(&self) -> usize {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .filter(|&x| self.is_foreground(x, y))
                    .count()
            })
            .sum()
    }

    /// Foreground fraction inside `rect`. Pixels of `rect` outside the buffer
    /// count as background; an empty rectangle yields `0`.
    pub fn fill_ratio(&self, rect: PixelRect) -> f32 {
        if rect.area() == 0 {
            return 0.0;
        }
        let mut hits = 0usize;
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if self.is_foreground(x, y) {
                    hits += 1;
                }
            }
        }
        hits as f32 / rect.area() as f32
    }

    /// True when no foreground pixel lies on row `y` between columns
    /// `x0..=x1`.
    pub fn row_is_empty(&self, y: i32, x0: i32, x1: i32) -> bool {
        (x0..=x1).all(|x| !self.is_foreground(x, y))
    }
}
