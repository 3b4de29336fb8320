//! Forward discrete Fourier transform along array axes.
//!
//! The inverse transforms in this crate never compute a DFT themselves; they are
//! expressed through whatever [`ForwardTransform`] they are handed. [`RustFftForward`]
//! is the default and [`NaiveDft`] evaluates the defining sum directly, which makes it
//! a slow but independent reference for tests.

use crate::error::FilterError;
use ndarray::{Array2, ArrayBase, ArrayD, ArrayViewD, Axis, Data, Ix2};
use num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// Unnormalized forward DFT, `X[k] = sum_t x[t] * exp(-2πi k t / n)`.
pub trait ForwardTransform: Send + Sync {
    /// Transforms every lane of `input` along the (already resolved) `axis`.
    ///
    /// The output has the shape of the input.
    fn transform_axis(
        &self,
        input: ArrayViewD<'_, Complex64>,
        axis: usize,
    ) -> Result<ArrayD<Complex64>, FilterError>;

    /// Transforms along each of `axes` in turn.
    fn transform_axes(
        &self,
        input: ArrayViewD<'_, Complex64>,
        axes: &[usize],
    ) -> Result<ArrayD<Complex64>, FilterError> {
        let mut output = input.to_owned();
        for &axis in axes {
            output = self.transform_axis(output.view(), axis)?;
        }
        Ok(output)
    }
}

/// Forward transform backed by `rustfft`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustFftForward;

impl ForwardTransform for RustFftForward {
    fn transform_axis(
        &self,
        input: ArrayViewD<'_, Complex64>,
        axis: usize,
    ) -> Result<ArrayD<Complex64>, FilterError> {
        check_axis(input.ndim(), axis)?;
        let mut output = input.to_owned();
        let n = output.len_of(Axis(axis));
        if n == 0 || output.is_empty() {
            return Ok(output);
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buffer = vec![Complex64::default(); n];
        let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];

        for mut lane in output.lanes_mut(Axis(axis)) {
            for (slot, value) in buffer.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            fft.process_with_scratch(&mut buffer, &mut scratch);
            for (value, slot) in lane.iter_mut().zip(buffer.iter()) {
                *value = *slot;
            }
        }
        Ok(output)
    }
}

/// Direct O(n²) evaluation of the DFT sum.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveDft;

impl ForwardTransform for NaiveDft {
    fn transform_axis(
        &self,
        input: ArrayViewD<'_, Complex64>,
        axis: usize,
    ) -> Result<ArrayD<Complex64>, FilterError> {
        check_axis(input.ndim(), axis)?;
        let mut output = input.to_owned();
        let n = output.len_of(Axis(axis));
        if n == 0 || output.is_empty() {
            return Ok(output);
        }

        let mut lane_in = vec![Complex64::default(); n];
        for mut lane in output.lanes_mut(Axis(axis)) {
            for (slot, value) in lane_in.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            for (k, out) in lane.iter_mut().enumerate() {
                let mut acc = Complex64::new(0.0, 0.0);
                for (t, &value) in lane_in.iter().enumerate() {
                    // reduce k*t first to keep the angle small for long lanes
                    let phase = ((k * t) % n) as f64;
                    let angle = -2.0 * PI * phase / n as f64;
                    acc += value * Complex64::from_polar(1.0, angle);
                }
                *out = acc;
            }
        }
        Ok(output)
    }
}

/// Forward 2-D transform of a real image, rows first, then columns.
pub fn forward_transform_2d<F, S>(
    forward: &F,
    image: &ArrayBase<S, Ix2>,
) -> Result<Array2<Complex64>, FilterError>
where
    F: ForwardTransform + ?Sized,
    S: Data<Elem = f64>,
{
    let promoted = image.mapv(|value| Complex64::new(value, 0.0)).into_dyn();
    let spectrum = forward.transform_axes(promoted.view(), &[0, 1])?;
    Ok(spectrum.into_dimensionality::<Ix2>()?)
}

fn check_axis(ndim: usize, axis: usize) -> Result<(), FilterError> {
    if axis < ndim {
        Ok(())
    } else {
        Err(FilterError::invalid(format!(
            "axis {axis} is out of bounds for an array of rank {ndim}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array3};

    fn assert_close(actual: &ArrayD<Complex64>, expected: &ArrayD<Complex64>, tol: f64) {
        assert_eq!(actual.shape(), expected.shape());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a.re, e.re, epsilon = tol);
            assert_abs_diff_eq!(a.im, e.im, epsilon = tol);
        }
    }

    #[test]
    fn test_rustfft_forward_of_impulse_is_flat() {
        let mut signal = Array1::<Complex64>::zeros(8);
        signal[0] = Complex64::new(1.0, 0.0);
        let spectrum = RustFftForward
            .transform_axis(signal.view().into_dyn(), 0)
            .unwrap();
        for value in spectrum.iter() {
            assert_abs_diff_eq!(value.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rustfft_matches_known_spectrum() {
        let signal = array![1.0, 2.0, 3.0, 4.0].mapv(|v| Complex64::new(v, 0.0));
        let spectrum = RustFftForward
            .transform_axis(signal.view().into_dyn(), 0)
            .unwrap();
        let expected = array![
            Complex64::new(10.0, 0.0),
            Complex64::new(-2.0, 2.0),
            Complex64::new(-2.0, 0.0),
            Complex64::new(-2.0, -2.0)
        ]
        .into_dyn();
        assert_close(&spectrum, &expected, 1e-12);
    }

    #[test]
    fn test_naive_and_rustfft_agree_along_every_axis() {
        let data = Array3::from_shape_fn((3, 5, 4), |(i, j, k)| {
            Complex64::new((i * 7 + j * 3 + k) as f64 % 5.0, (i + 2 * k) as f64 - j as f64)
        })
        .into_dyn();
        for axis in 0..3 {
            let fast = RustFftForward.transform_axis(data.view(), axis).unwrap();
            let slow = NaiveDft.transform_axis(data.view(), axis).unwrap();
            assert_close(&fast, &slow, 1e-9);
        }
    }

    #[test]
    fn test_transform_axis_rejects_invalid_axis() {
        let data = Array1::<Complex64>::zeros(4).into_dyn();
        assert!(RustFftForward.transform_axis(data.view(), 1).is_err());
        assert!(NaiveDft.transform_axis(data.view(), 3).is_err());
    }

    #[test]
    fn test_forward_transform_2d_dc_bin_is_sum() {
        let image = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let spectrum = forward_transform_2d(&RustFftForward, &image).unwrap();
        assert_eq!(spectrum.dim(), (2, 3));
        assert_abs_diff_eq!(spectrum[[0, 0]].re, 21.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spectrum[[0, 0]].im, 0.0, epsilon = 1e-12);
        // row difference lands in bin (1, 0)
        assert_abs_diff_eq!(spectrum[[1, 0]].re, -9.0, epsilon = 1e-12);
    }
}
