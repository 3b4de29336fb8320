//! Spatial averaging filter.
//!
//! The low pass replaces every pixel with the mean of its `size × size`
//! neighborhood. The high pass uses `δ - h`, i.e. the pixel minus that mean, and is
//! offset by 128 like the frequency domain high pass.

use crate::config::{FilterSettings, PassMode};
use crate::error::FilterError;
use crate::filters::filter::{Filter, FilterConfig, FilterDomain};
use crate::filters::ideal_dft::{as_channels, restore_rank};
use filter_macros::register_filter;
use ndarray::{stack, Array, Array2, Array3, ArrayBase, ArrayView2, ArrayView3, Axis, Data, Dimension};
use num_traits::{AsPrimitive, Bounded, NumCast};
use rayon::prelude::*;

/// Square averaging kernel with every weight `1 / size²`.
pub fn box_kernel(size: usize) -> Result<Array2<f32>, FilterError> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::invalid(format!(
            "kernel size must be a positive odd number, got {size}"
        )));
    }
    Ok(Array2::from_elem((size, size), 1.0 / (size * size) as f32))
}

/// Applies the box low or high pass to a `(rows, cols)` or `(rows, cols, channels)` image.
///
/// Borders are reflected without repeating the edge pixel. Each result is first
/// rounded and saturated to `T`; the high pass then adds 128, clamps to
/// `[0, 255]` and casts with `as` semantics.
pub fn apply_box_filter<T, S, D>(
    image: &ArrayBase<S, D>,
    size: usize,
    pass: PassMode,
) -> Result<Array<T, D>, FilterError>
where
    T: AsPrimitive<f64> + NumCast + Bounded + Send + Sync,
    f64: AsPrimitive<T>,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut kernel = box_kernel(size)?.mapv(<f64 as From<f32>>::from);
    if pass == PassMode::HighPass {
        kernel.mapv_inplace(|w| -w);
        kernel[[size / 2, size / 2]] += 1.0;
    }
    let channels = as_channels(image)?;
    let (rows, cols, n_channels) = channels.dim();

    let filtered = (0..n_channels)
        .into_par_iter()
        .map(|channel| correlate(channels.index_axis(Axis(2), channel), &kernel))
        .collect::<Vec<Array2<T>>>();
    let views: Vec<ArrayView2<T>> = filtered.iter().map(|c| c.view()).collect();
    let mut combined: Array3<T> = stack(Axis(2), &views)?;

    if pass == PassMode::HighPass {
        combined.mapv_inplace(|v| {
            let value: f64 = v.as_();
            let shifted = (value as f32 + 128.0).clamp(0.0, 255.0);
            (shifted as f64).as_()
        });
    }
    log::info!("box {pass} filter (size {size}) applied to {rows}x{cols}x{n_channels} image");
    restore_rank(combined, image.ndim())
}

/// Correlates `channel` with `kernel`, saturating every result to `T`.
fn correlate<T>(channel: ArrayView2<'_, T>, kernel: &Array2<f64>) -> Array2<T>
where
    T: AsPrimitive<f64> + NumCast + Bounded,
    f64: AsPrimitive<T>,
{
    let (rows, cols) = channel.dim();
    let (k_rows, k_cols) = kernel.dim();
    let (r_off, c_off) = ((k_rows / 2) as isize, (k_cols / 2) as isize);

    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let mut acc = 0.0;
        for ((ki, kj), &weight) in kernel.indexed_iter() {
            let src_i = reflect_101(i as isize + ki as isize - r_off, rows);
            let src_j = reflect_101(j as isize + kj as isize - c_off, cols);
            let value: f64 = channel[[src_i, src_j]].as_();
            acc += weight * value;
        }
        saturate(acc)
    })
}

/// Narrows `value` to `T`, clamped to the range of `T`.
///
/// Integer types round half to even, floating point types keep the value.
pub(crate) fn saturate<T>(value: f64) -> T
where
    T: AsPrimitive<f64> + NumCast + Bounded,
    f64: AsPrimitive<T>,
{
    let (low, high): (f64, f64) = (T::min_value().as_(), T::max_value().as_());
    let clamped = value.clamp(low, high);
    let integral = <T as NumCast>::from(0.5).map_or(true, |half: T| half.as_() != 0.5);
    let narrowed = if integral {
        clamped.round_ties_even()
    } else {
        clamped
    };
    // u64::MAX is not representable in f64, so the upper clamp can overshoot
    <T as NumCast>::from(narrowed).unwrap_or_else(|| narrowed.as_())
}

/// Maps an out-of-range index back into `0..len` by mirroring at the borders
/// without repeating the border element (`dcb|abcd|cba`).
pub(crate) fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

#[register_filter]
#[derive(Clone, Debug)]
pub struct BoxFilter {
    pub size: usize,
    pub pass: PassMode,
}

impl Filter for BoxFilter {
    fn new() -> Self
    where
        Self: Sized,
    {
        BoxFilter {
            size: 3,
            pass: PassMode::LowPass,
        }
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Box Filter".to_string(),
            description: "Averages every pixel over a square neighborhood (low pass) or subtracts \
                          that average from the pixel (high pass)."
                .to_string(),
            domain: FilterDomain::Spatial,
        }
    }

    fn configure(&mut self, settings: &FilterSettings) -> Result<(), FilterError> {
        box_kernel(settings.kernel_size)?;
        self.size = settings.kernel_size;
        self.pass = settings.filter_type;
        Ok(())
    }

    fn filter(&self, image: ArrayView3<'_, u8>) -> Result<Array3<u8>, FilterError> {
        apply_box_filter(&image, self.size, self.pass)
    }
}
