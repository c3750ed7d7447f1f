//! RGBA pixel buffers and the primitive transforms the recognizers consume.
//!
//! Every transform allocates a fresh buffer. The only in-place mutation is
//! [`RgbaImage::put_pixel`], used for debug annotation.

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a pixel buffer from raw parts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    ZeroDimensions { width: usize, height: usize },
}

/// Opaque black, the background of a binary buffer.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];
/// Opaque white, the foreground of a binary buffer.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
/// Fully transparent black, used for pixels outside a source buffer.
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Axis-aligned pixel rectangle. `x`/`y` may be negative when a region
/// hangs off the top-left edge of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Same rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Row-major RGBA8 buffer. `data.len() == width * height * 4` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// New buffer with every pixel set to [`CLEAR`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, CLEAR)
    }

    /// New buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap decoded RGBA bytes. Rejects zero-area buffers and length mismatches.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(ImageError::ZeroDimensions { width, height })?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn offset_of(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// Bounds-checked pixel read.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let o = self.offset_of(x as usize, y as usize);
        Some([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Pixel read that yields [`CLEAR`] outside the buffer.
    #[inline]
    pub fn pixel_or_clear(&self, x: i32, y: i32) -> [u8; 4] {
        self.pixel(x, y).unwrap_or(CLEAR)
    }

    /// Write one pixel. Writes outside the buffer are dropped.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if !self.in_bounds(x, y) {
            return;
        }
        let o = self.offset_of(x as usize, y as usize);
        self.data[o..o + 4].copy_from_slice(&color);
    }

    /// Binary interpretation: a pixel is foreground iff its red channel is
    /// non-zero. Out-of-bounds reads are background.
    #[inline]
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.data[self.offset_of(x as usize, y as usize)] != 0
    }

    /// Copy `rect` into a new buffer. Parts of `rect` outside the source are
    /// filled with [`CLEAR`].
    pub fn crop(&self, rect: PixelRect) -> Self {
        let mut out = Self::new(rect.width, rect.height);
        for y in 0..rect.height {
            for x in 0..rect.width {
                let sx = rect.x + x as i32;
                let sy = rect.y + y as i32;
                if let Some(p) = self.pixel(sx, sy) {
                    out.put_pixel(x as i32, y as i32, p);
                }
            }
        }
        out
    }

    /// Resample to exactly `width × height` with bilinear filtering.
    pub fn stretch_to(&self, width: usize, height: usize) -> Self {
        let mut out = Self::new(width, height);
        if self.is_empty() || width == 0 || height == 0 {
            return out;
        }
        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height as f32;
        for y in 0..height {
            let fy = (y as f32 + 0.5) * sy - 0.5;
            for x in 0..width {
                let fx = (x as f32 + 0.5) * sx - 0.5;
                out.put_pixel(x as i32, y as i32, sample_bilinear_rgba(self, fx, fy));
            }
        }
        out
    }

    /// Scale to fit inside `width × height` preserving aspect ratio, centred,
    /// with the margins filled by `fill`.
    pub fn letterbox_into(&self, width: usize, height: usize, fill: [u8; 4]) -> Self {
        let mut out = Self::filled(width, height, fill);
        if self.is_empty() || width == 0 || height == 0 {
            return out;
        }
        let scale = (width as f32 / self.width as f32).min(height as f32 / self.height as f32);
        let fit_w = ((self.width as f32 * scale).round() as usize).clamp(1, width);
        let fit_h = ((self.height as f32 * scale).round() as usize).clamp(1, height);
        let scaled = self.stretch_to(fit_w, fit_h);
        let ox = ((width - fit_w) / 2) as i32;
        let oy = ((height - fit_h) / 2) as i32;
        for y in 0..fit_h as i32 {
            for x in 0..fit_w as i32 {
                out.put_pixel(ox + x, oy + y, scaled.pixel_or_clear(x, y));
            }
        }
        out
    }

    /// Translate content by `(dx, dy)`; uncovered pixels become `fill`.
    pub fn displace(&self, dx: i32, dy: i32, fill: [u8; 4]) -> Self {
        let mut out = Self::filled(self.width, self.height, fill);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some(p) = self.pixel(x - dx, y - dy) {
                    out.put_pixel(x, y, p);
                }
            }
        }
        out
    }
}

/// Bilinear RGBA sample with edge clamping.
pub fn sample_bilinear_rgba(src: &RgbaImage, x: f32, y: f32) -> [u8; 4] {
    let max_x = src.width as i32 - 1;
    let max_y = src.height as i32 - 1;
    let x = x.clamp(0.0, max_x as f32);
    let y = y.clamp(0.0, max_y as f32);
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = src.pixel_or_clear(x0, y0);
    let p10 = src.pixel_or_clear(x1, y0);
    let p01 = src.pixel_or_clear(x0, y1);
    let p11 = src.pixel_or_clear(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = (a + fy * (b - a)).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: usize, h: usize) -> RgbaImage {
        let mut img = RgbaImage::filled(w, h, BLACK);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if (x + y) % 2 == 0 {
                    img.put_pixel(x, y, WHITE);
                }
            }
        }
        img
    }

    #[test]
    fn from_raw_rejects_bad_lengths_and_zero_area() {
        assert_eq!(
            RgbaImage::from_raw(2, 2, vec![0; 15]),
            Err(ImageError::InvalidBufferLength {
                expected: 16,
                got: 15
            })
        );
        assert_eq!(
            RgbaImage::from_raw(0, 3, Vec::new()),
            Err(ImageError::ZeroDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(RgbaImage::from_raw(2, 2, vec![7; 16]).is_ok());
    }

    #[test]
    fn out_of_bounds_reads_are_background() {
        let img = RgbaImage::filled(3, 3, WHITE);
        assert!(img.is_foreground(0, 0));
        assert!(!img.is_foreground(-1, 0));
        assert!(!img.is_foreground(3, 1));
        assert_eq!(img.pixel(1, 5), None);
    }

    #[test]
    fn crop_copies_and_pads_with_clear() {
        let img = checker(4, 4);
        let c = img.crop(PixelRect::new(3, 3, 2, 2));
        assert_eq!(c.width(), 2);
        assert_eq!(c.pixel(0, 0), Some(WHITE));
        assert_eq!(c.pixel(1, 1), Some(CLEAR));
    }

    #[test]
    fn stretch_identity_size_preserves_pixels() {
        let img = checker(5, 3);
        assert_eq!(img.stretch_to(5, 3), img);
    }

    #[test]
    fn stretch_doubles_solid_color() {
        let img = RgbaImage::filled(2, 2, [10, 20, 30, 255]);
        let big = img.stretch_to(4, 6);
        assert_eq!(big.width(), 4);
        assert_eq!(big.height(), 6);
        assert!(big
            .as_raw()
            .chunks_exact(4)
            .all(|p| p == [10, 20, 30, 255]));
    }

    #[test]
    fn letterbox_centres_content() {
        let img = RgbaImage::filled(4, 2, WHITE);
        let boxed = img.letterbox_into(8, 8, BLACK);
        assert_eq!(boxed.pixel(0, 0), Some(BLACK));
        assert_eq!(boxed.pixel(4, 4), Some(WHITE));
        assert_eq!(boxed.pixel(4, 1), Some(BLACK));
    }

    #[test]
    fn displace_shifts_and_fills() {
        let mut img = RgbaImage::filled(3, 1, BLACK);
        img.put_pixel(0, 0, WHITE);
        let moved = img.displace(2, 0, BLACK);
        assert!(!moved.is_foreground(0, 0));
        assert!(moved.is_foreground(2, 0));
    }
}
