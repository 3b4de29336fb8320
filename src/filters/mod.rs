//! Image filters.
//!
//! Filters are organized by their domain of operation:
//!
//! * **Frequency Domain Filters**: Applied to the centered 2-D spectrum of every channel.
//!
//! * **Spatial Filters**: Applied to the pixel grid directly.
//!
//! # Filter Implementations
//!
//! Each filter implements the `Filter` trait defined in the `filter` module,
//! providing a consistent interface for configuration and application.

/// Spatial averaging filter with a square box kernel.
pub mod box_filter;

/// Core filter interfaces and shared components.
/// Defines the `Filter` trait and the global filter registry.
pub mod filter;

/// Ideal low/high pass filter acting on the centered spectrum.
/// Keeps or drops every frequency bin based on a hard cutoff.
pub mod ideal_dft;
