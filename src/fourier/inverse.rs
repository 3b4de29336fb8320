//! Inverse transforms expressed through a forward transform.
//!
//! `IDFT(x) = conj(DFT(conj(x))) * scale` with `scale` given by [`Normalization`].
//! Length adjustment (truncation or zero-padding at the end) happens once, before
//! the transform, and only along the transformed axis.

use crate::config::Normalization;
use crate::error::FilterError;
use crate::fourier::axis::resolve_axis;
use crate::fourier::forward::{ForwardTransform, RustFftForward};
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};
use num_complex::Complex64;

/// 1-D inverse transform along `axis` using the default forward transform.
///
/// See [`inverse_transform_1d_with`].
pub fn inverse_transform_1d<S, D>(
    x: &ArrayBase<S, D>,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
) -> Result<Array<Complex64, D>, FilterError>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    inverse_transform_1d_with(&RustFftForward, x, n, axis, norm)
}

/// 1-D inverse transform along `axis`.
///
/// `n` is the output length along `axis`; the input is truncated or zero-padded
/// to it first. `None` keeps the current length. All other axes are left as
/// they are.
pub fn inverse_transform_1d_with<F, S, D>(
    forward: &F,
    x: &ArrayBase<S, D>,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
) -> Result<Array<Complex64, D>, FilterError>
where
    F: ForwardTransform + ?Sized,
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    let axis = resolve_axis(axis, x.ndim())?;
    let n = n.unwrap_or_else(|| x.len_of(Axis(axis)));
    if n == 0 {
        return Err(FilterError::invalid(format!(
            "invalid number of data points ({n}) specified"
        )));
    }

    let conjugated = resize_conjugated(x, axis, n);
    let scale = norm.inverse_scale(n);
    log::debug!(
        "inverse transform along axis {axis}: {:?} -> length {n}, {norm} normalization",
        x.shape()
    );

    let transformed = forward.transform_axis(conjugated.view().into_dyn(), axis)?;
    let output = transformed.mapv_into(|value| value.conj() * scale);
    Ok(output.into_dimensionality::<D>()?)
}

/// 2-D inverse transform using the default forward transform.
///
/// See [`inverse_transform_2d_with`].
pub fn inverse_transform_2d<S, D>(
    a: &ArrayBase<S, D>,
    shape: Option<(usize, usize)>,
    axes: (isize, isize),
    norm: Normalization,
) -> Result<Array<Complex64, D>, FilterError>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    inverse_transform_2d_with(&RustFftForward, a, shape, axes, norm)
}

/// 2-D inverse transform: a 1-D inverse along `axes.0`, then along `axes.1`.
///
/// `shape` gives the output lengths along the two axes in the same order.
/// Both passes use `norm`. Both axes are resolved before any work is done.
pub fn inverse_transform_2d_with<F, S, D>(
    forward: &F,
    a: &ArrayBase<S, D>,
    shape: Option<(usize, usize)>,
    axes: (isize, isize),
    norm: Normalization,
) -> Result<Array<Complex64, D>, FilterError>
where
    F: ForwardTransform + ?Sized,
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    resolve_axis(axes.0, a.ndim())?;
    resolve_axis(axes.1, a.ndim())?;
    let (first_len, second_len) = match shape {
        Some((first, second)) => (Some(first), Some(second)),
        None => (None, None),
    };
    if first_len == Some(0) || second_len == Some(0) {
        return Err(FilterError::invalid(format!(
            "invalid output shape {shape:?} specified"
        )));
    }

    let first = inverse_transform_1d_with(forward, a, first_len, axes.0, norm)?;
    inverse_transform_1d_with(forward, &first, second_len, axes.1, norm)
}

/// Conjugated copy of `x` with length `n` along `axis`, truncated or zero-padded at the end.
fn resize_conjugated<S, D>(x: &ArrayBase<S, D>, axis: usize, n: usize) -> Array<Complex64, D>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    let mut dim = x.raw_dim();
    dim[axis] = n;
    let mut output = Array::<Complex64, D>::zeros(dim);
    let keep = n.min(x.len_of(Axis(axis)));
    output
        .slice_axis_mut(Axis(axis), Slice::from(..keep))
        .zip_mut_with(&x.slice_axis(Axis(axis), Slice::from(..keep)), |out, value| {
            *out = value.conj()
        });
    output
}
