//! Reading and writing images as `(rows, cols, channels)` arrays.

use crate::error::FilterError;
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::Array3;
use std::path::Path;

/// Loads an image file in any format supported by the `image` crate.
///
/// Grayscale images (with or without alpha) come back with one channel, everything
/// else is converted to RGB with three channels. Alpha is dropped.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Array3<u8>, FilterError> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let grayscale = matches!(
        img,
        DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
    );

    let (width, height) = (img.width() as usize, img.height() as usize);
    let array = if grayscale {
        Array3::from_shape_vec((height, width, 1), img.into_luma8().into_raw())?
    } else {
        Array3::from_shape_vec((height, width, 3), img.into_rgb8().into_raw())?
    };
    log::debug!("loaded {} as {:?}", path.display(), array.shape());
    Ok(array)
}

/// Saves a one or three channel image; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(image: &Array3<u8>, path: P) -> Result<(), FilterError> {
    let path = path.as_ref();
    let (height, width, channels) = image.dim();
    let raw: Vec<u8> = image.iter().copied().collect();
    let size_error =
        || FilterError::invalid("container should have the right size for the image dimensions");

    match channels {
        1 => GrayImage::from_raw(width as u32, height as u32, raw)
            .ok_or_else(size_error)?
            .save(path)?,
        3 => RgbImage::from_raw(width as u32, height as u32, raw)
            .ok_or_else(size_error)?
            .save(path)?,
        other => {
            return Err(FilterError::invalid(format!(
                "only 1 or 3 channel images can be saved, got {other}"
            )))
        }
    }
    log::debug!("saved {:?} image to {}", image.shape(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dft_image_filter_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_grayscale_png_roundtrip() {
        let image = Array3::from_shape_fn((4, 6, 1), |(i, j, _)| (i * 40 + j * 7) as u8);
        let path = temp_path("gray.png");
        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, image);
        assert_eq!(loaded[[3, 5, 0]], 155);
    }

    #[test]
    fn test_rgb_png_roundtrip() {
        let image = Array3::from_shape_fn((3, 5, 3), |(i, j, c)| (i * 50 + j * 10 + c) as u8);
        let path = temp_path("rgb.png");
        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_two_channel_images_are_rejected() {
        let image = Array3::<u8>::zeros((2, 2, 2));
        let err = save_image(&image, temp_path("two.png")).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_missing_file_is_an_image_error() {
        let err = load_image(temp_path("missing.png")).unwrap_err();
        assert!(matches!(err, FilterError::Image(_)));
    }
}
