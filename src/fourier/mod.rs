//! Discrete Fourier transform building blocks.
//!
//! The forward transform is an injected capability ([`ForwardTransform`]); everything
//! else is built on top of it and follows the NumPy conventions for axis ordering,
//! normalization and zero-frequency placement:
//!
//! * **Axis resolution**: negative axis indices count from the last axis.
//! * **Frequency shifts**: centering the zero frequency and undoing it.
//! * **Inverse transforms**: 1-D along any axis with truncation/zero-padding, and
//!   2-D as two 1-D passes in a fixed order.

/// Resolution of possibly negative axis indices.
pub mod axis;

/// The forward transform capability and its implementations.
pub mod forward;

/// Inverse transforms expressed through the forward transform.
pub mod inverse;

/// Cyclic shifts moving the zero frequency to the center and back.
pub mod shift;

pub use axis::resolve_axis;
pub use forward::{forward_transform_2d, ForwardTransform, NaiveDft, RustFftForward};
pub use inverse::{
    inverse_transform_1d, inverse_transform_1d_with, inverse_transform_2d,
    inverse_transform_2d_with,
};
pub use shift::{center_frequency_shift, inverse_frequency_shift};
