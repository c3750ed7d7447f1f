//! Adapters between `image` buffers and [`RgbaImage`].

use scoreboard_ocr_core::{ImageError, RgbaImage};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ImageIoError {
    #[error(transparent)]
    Decode(#[from] ::image::ImageError),
    #[error(transparent)]
    Buffer(#[from] ImageError),
    #[error("image {width}x{height} does not fit an image buffer")]
    TooLarge { width: usize, height: usize },
}

/// Copy an `image::RgbaImage` into the core buffer type.
pub fn from_rgba8(img: &::image::RgbaImage) -> Result<RgbaImage, ImageError> {
    RgbaImage::from_raw(
        img.width() as usize,
        img.height() as usize,
        img.as_raw().clone(),
    )
}

/// Convert any decoded image to RGBA first.
pub fn from_dynamic(img: &::image::DynamicImage) -> Result<RgbaImage, ImageError> {
    from_rgba8(&img.to_rgba8())
}

pub fn to_rgba8(img: &RgbaImage) -> Result<::image::RgbaImage, ImageIoError> {
    let too_large = || ImageIoError::TooLarge {
        width: img.width(),
        height: img.height(),
    };
    let width = u32::try_from(img.width()).map_err(|_| too_large())?;
    let height = u32::try_from(img.height()).map_err(|_| too_large())?;
    ::image::RgbaImage::from_raw(width, height, img.as_raw().to_vec()).ok_or_else(too_large)
}

/// Decode an image file (format from its extension/contents).
pub fn load_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, ImageIoError> {
    let decoded = ::image::open(path)?;
    Ok(from_dynamic(&decoded)?)
}

/// Encode `img` to `path`; the format follows the extension.
pub fn save_image(img: &RgbaImage, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    to_rgba8(img)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        let mut img = RgbaImage::filled(3, 2, [0, 0, 0, 255]);
        img.put_pixel(2, 1, [9, 8, 7, 255]);
        let external = to_rgba8(&img).expect("to");
        assert_eq!(external.get_pixel(2, 1).0, [9, 8, 7, 255]);
        assert_eq!(from_rgba8(&external).expect("from"), img);
    }

    #[test]
    fn png_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("crop.png");
        let img = RgbaImage::filled(4, 4, [10, 200, 30, 255]);
        save_image(&img, &path).expect("save");
        assert_eq!(load_rgba(&path).expect("load"), img);
    }
}
