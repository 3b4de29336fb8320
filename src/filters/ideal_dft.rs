//! Ideal frequency domain filter.
//!
//! Every channel is transformed, centered, multiplied with a binary mask and
//! transformed back. The mask keeps a bin based on the magnitude of its angular
//! frequency only, so the cutoff is a hard edge (hence "ideal").

use crate::config::{Direction, FilterSettings, Normalization, PassMode};
use crate::error::FilterError;
use crate::filters::filter::{Filter, FilterConfig, FilterDomain};
use crate::fourier::{
    center_frequency_shift, forward_transform_2d, inverse_frequency_shift,
    inverse_transform_2d_with, ForwardTransform, RustFftForward,
};
use filter_macros::register_filter;
use ndarray::{
    stack, Array, Array1, Array2, Array3, ArrayBase, ArrayView2, ArrayView3, Axis, Data,
    Dimension, Ix3,
};
use num_traits::AsPrimitive;
use rayon::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

/// Angular frequency of every bin of a centered axis of length `len`.
///
/// Bin `i` maps to `(i - len / 2) * 2π / len`, so the zero frequency sits at `len / 2`.
// For odd `len` this is one bin earlier than a floored `-len / 2` start; it has to
// match the bin `center_frequency_shift` moves the zero frequency to.
pub fn frequency_grid(len: usize) -> Array1<f64> {
    let offset = (len / 2) as f64;
    let step = 2.0 * PI / len as f64;
    Array1::from_shape_fn(len, |i| (i as f64 - offset) * step)
}

/// Binary mask for a centered spectrum of `rows × cols` bins.
///
/// The horizontal frequency of a bin is its column frequency and the vertical
/// frequency its row frequency. Low pass keeps bins at or below `wc`, high pass
/// keeps the complement.
pub fn frequency_mask(
    rows: usize,
    cols: usize,
    wc: f64,
    direction: Direction,
    pass: PassMode,
) -> Array2<f64> {
    let vertical = frequency_grid(rows);
    let horizontal = frequency_grid(cols);
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let h = horizontal[j].abs();
        let w = vertical[i].abs();
        let keep = match (pass, direction) {
            (PassMode::LowPass, Direction::Both) => h <= wc && w <= wc,
            (PassMode::LowPass, Direction::Horizontal) => h <= wc,
            (PassMode::LowPass, Direction::Vertical) => w <= wc,
            (PassMode::HighPass, Direction::Both) => h > wc || w > wc,
            (PassMode::HighPass, Direction::Horizontal) => h > wc,
            (PassMode::HighPass, Direction::Vertical) => w > wc,
        };
        if keep {
            1.0
        } else {
            0.0
        }
    })
}

/// Applies an ideal low or high pass filter to a 2-D `(rows, cols)` or 3-D
/// `(rows, cols, channels)` image using the default forward transform.
///
/// See [`apply_ideal_filter_with`].
pub fn apply_ideal_filter<T, S, D>(
    image: &ArrayBase<S, D>,
    wc: f64,
    direction: Direction,
    pass: PassMode,
) -> Result<Array<T, D>, FilterError>
where
    T: AsPrimitive<f64> + Send + Sync,
    f64: AsPrimitive<T>,
    S: Data<Elem = T>,
    D: Dimension,
{
    apply_ideal_filter_with(&RustFftForward, image, wc, direction, pass)
}

/// Applies an ideal low or high pass filter with an explicit forward transform.
///
/// Channels are filtered independently and in parallel. The real part of the
/// result is narrowed back to `T`: low pass clamps to `[0, 255]`, high pass first
/// adds 128 so that a zero response maps to mid grey. Both cast with `as`
/// semantics, i.e. integer results are truncated.
pub fn apply_ideal_filter_with<F, T, S, D>(
    forward: &F,
    image: &ArrayBase<S, D>,
    wc: f64,
    direction: Direction,
    pass: PassMode,
) -> Result<Array<T, D>, FilterError>
where
    F: ForwardTransform + ?Sized,
    T: AsPrimitive<f64> + Send + Sync,
    f64: AsPrimitive<T>,
    S: Data<Elem = T>,
    D: Dimension,
{
    if !wc.is_finite() || wc <= 0.0 {
        return Err(FilterError::invalid(format!(
            "cutoff must be a positive finite frequency, got {wc}"
        )));
    }
    let channels = as_channels(image)?;
    let (rows, cols, n_channels) = channels.dim();

    let mask = frequency_mask(rows, cols, wc, direction, pass);
    let filtered = (0..n_channels)
        .into_par_iter()
        .map(|channel| filter_channel(forward, channels.index_axis(Axis(2), channel), &mask))
        .collect::<Result<Vec<Array2<f64>>, FilterError>>()?;
    let views: Vec<ArrayView2<f64>> = filtered.iter().map(|c| c.view()).collect();
    let combined = stack(Axis(2), &views)?;

    let narrowed = match pass {
        PassMode::LowPass => combined.mapv(|v| -> T { v.clamp(0.0, 255.0).as_() }),
        PassMode::HighPass => combined.mapv(|v| -> T {
            let shifted = (v as f32 + 128.0).clamp(0.0, 255.0);
            (shifted as f64).as_()
        }),
    };
    log::info!(
        "ideal {pass} filter ({direction}, wc = {wc:.4}) applied to {rows}x{cols}x{n_channels} image"
    );
    restore_rank(narrowed, image.ndim())
}

/// Filters a single channel and returns the real part of the result.
fn filter_channel<F, T>(
    forward: &F,
    channel: ArrayView2<'_, T>,
    mask: &Array2<f64>,
) -> Result<Array2<f64>, FilterError>
where
    F: ForwardTransform + ?Sized,
    T: AsPrimitive<f64>,
{
    let promoted = channel.mapv(|v| {
        let value: f64 = v.as_();
        value as f32 as f64
    });
    let spectrum = forward_transform_2d(forward, &promoted)?;
    let mut centered = center_frequency_shift(&spectrum, None)?;
    centered.zip_mut_with(mask, |bin, &keep| *bin *= keep);
    let uncentered = inverse_frequency_shift(&centered, None)?;
    let spatial = inverse_transform_2d_with(
        forward,
        &uncentered,
        None,
        (0, 1),
        Normalization::Backward,
    )?;
    Ok(spatial.mapv(|v| v.re))
}

/// Views a rank 2 or rank 3 image as `(rows, cols, channels)`.
pub(crate) fn as_channels<T, S, D>(image: &ArrayBase<S, D>) -> Result<ArrayView3<'_, T>, FilterError>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    if image.shape().contains(&0) {
        return Err(FilterError::invalid(format!(
            "image must not have an empty axis, got shape {:?}",
            image.shape()
        )));
    }
    let view = image.view().into_dyn();
    match image.ndim() {
        2 => Ok(view.insert_axis(Axis(2)).into_dimensionality::<Ix3>()?),
        3 => Ok(view.into_dimensionality::<Ix3>()?),
        ndim => Err(FilterError::invalid(format!(
            "image must have 2 or 3 dimensions, got {ndim}"
        ))),
    }
}

/// Inverse of [`as_channels`] for an owned result.
pub(crate) fn restore_rank<T, D>(image: Array3<T>, ndim: usize) -> Result<Array<T, D>, FilterError>
where
    D: Dimension,
{
    if ndim == 2 {
        Ok(image
            .index_axis_move(Axis(2), 0)
            .into_dimensionality::<D>()?)
    } else {
        Ok(image.into_dimensionality::<D>()?)
    }
}

#[register_filter]
#[derive(Clone, Debug)]
pub struct IdealDftFilter {
    pub cutoff: f64,
    pub direction: Direction,
    pub pass: PassMode,
}

impl Filter for IdealDftFilter {
    fn new() -> Self
    where
        Self: Sized,
    {
        IdealDftFilter {
            cutoff: FRAC_PI_2,
            direction: Direction::Both,
            pass: PassMode::LowPass,
        }
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Ideal DFT Filter".to_string(),
            description: "Keeps (low pass) or removes (high pass) every frequency up to the cutoff, \
                          horizontally, vertically or in both directions."
                .to_string(),
            domain: FilterDomain::Frequency,
        }
    }

    fn configure(&mut self, settings: &FilterSettings) -> Result<(), FilterError> {
        if !settings.cutoff.is_finite() || settings.cutoff <= 0.0 {
            return Err(FilterError::invalid(format!(
                "cutoff must be a positive finite frequency, got {}",
                settings.cutoff
            )));
        }
        self.cutoff = settings.cutoff;
        self.direction = settings.direction;
        self.pass = settings.filter_type;
        Ok(())
    }

    fn filter(&self, image: ArrayView3<'_, u8>) -> Result<Array3<u8>, FilterError> {
        apply_ideal_filter(&image, self.cutoff, self.direction, self.pass)
    }
}
