//! Error type shared by the transform core, the filters and the image I/O layer.

use thiserror::Error;

/// Errors raised by transforms, filters and image I/O.
///
/// Validation failures are always reported as [`FilterError::InvalidArgument`]
/// before any array is allocated or transformed.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A parameter was out of range, unknown or inconsistent with the input shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An intermediate array could not be reshaped.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Decoding or encoding an image file failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl FilterError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        FilterError::InvalidArgument(detail.into())
    }

    /// Returns `true` for [`FilterError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FilterError::InvalidArgument(_))
    }
}
