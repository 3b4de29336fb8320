//! Ideal low and high pass filtering of images in the discrete Fourier domain.
//!
//! The crate is organized in layers:
//!
//! * [`fourier`]: forward/inverse transforms along arbitrary axes and the
//!   zero-frequency shifts. The forward transform is injected through
//!   [`fourier::ForwardTransform`].
//! * [`filters`]: the ideal frequency domain filter, a spatial box filter and the
//!   global registry both are registered in.
//! * [`io`]: image files to `(rows, cols, channels)` arrays and back.
//! * [`config`]: filter parameters and the settings persisted by the binary.

/// Filter parameters and persisted settings.
pub mod config;

/// Error type of the crate.
pub mod error;

/// Discrete Fourier transform building blocks.
pub mod fourier;

/// Image filters and the filter registry.
pub mod filters;

/// Image file I/O.
pub mod io;

pub use config::{Direction, FilterSettings, Normalization, PassMode};
pub use error::FilterError;
pub use filters::box_filter::{apply_box_filter, box_kernel};
pub use filters::ideal_dft::{apply_ideal_filter, apply_ideal_filter_with, frequency_mask};
pub use fourier::{
    center_frequency_shift, forward_transform_2d, inverse_frequency_shift, inverse_transform_1d,
    inverse_transform_1d_with, inverse_transform_2d, inverse_transform_2d_with, resolve_axis,
    ForwardTransform, NaiveDft, RustFftForward,
};
