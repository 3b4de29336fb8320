use crate::error::FilterError;
use crate::fourier::axis::resolve_axes;
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};

/// Moves the zero-frequency bin to the center of every selected axis.
///
/// Each axis of length `n` is rolled forward by `n / 2`, so index 0 ends up at
/// `n / 2`. `axes` defaults to all axes.
pub fn center_frequency_shift<A, S, D>(
    x: &ArrayBase<S, D>,
    axes: Option<&[isize]>,
) -> Result<Array<A, D>, FilterError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axes = resolve_axes(axes, x.ndim())?;
    let mut output = x.to_owned();
    for axis in axes {
        let n = output.len_of(Axis(axis));
        output = roll_axis(&output, Axis(axis), n / 2);
    }
    Ok(output)
}

/// Undoes [`center_frequency_shift`].
///
/// Each selected axis of length `n` is rolled forward by `ceil(n / 2)`, which
/// brings the element at `n / 2` back to index 0 for even and odd lengths alike.
/// `axes` defaults to all axes; the order in which axes are given does not matter.
pub fn inverse_frequency_shift<A, S, D>(
    x: &ArrayBase<S, D>,
    axes: Option<&[isize]>,
) -> Result<Array<A, D>, FilterError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axes = resolve_axes(axes, x.ndim())?;
    let mut output = x.to_owned();
    for axis in axes {
        let n = output.len_of(Axis(axis));
        output = roll_axis(&output, Axis(axis), n.div_ceil(2));
    }
    Ok(output)
}

/// Cyclic roll: the element at `i` moves to `(i + shift) % n`.
fn roll_axis<A, D>(input: &Array<A, D>, axis: Axis, shift: usize) -> Array<A, D>
where
    A: Clone,
    D: Dimension,
{
    let n = input.len_of(axis);
    let mut output = input.clone();
    if n == 0 || shift % n == 0 {
        return output;
    }
    let shift = shift % n;

    output
        .slice_axis_mut(axis, Slice::from(shift..))
        .assign(&input.slice_axis(axis, Slice::from(..n - shift)));
    output
        .slice_axis_mut(axis, Slice::from(..shift))
        .assign(&input.slice_axis(axis, Slice::from(n - shift..)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_inverse_shift_even_length() {
        let shifted = array![-4, -3, -2, -1, 0, 1, 2, 3];
        let restored = inverse_frequency_shift(&shifted, None).unwrap();
        assert_eq!(restored, array![0, 1, 2, 3, -4, -3, -2, -1]);
    }

    #[test]
    fn test_inverse_shift_odd_length() {
        // centered layout of the frequencies [0, 1, 2, -2, -1]
        let shifted = array![-2, -1, 0, 1, 2];
        let restored = inverse_frequency_shift(&shifted, None).unwrap();
        assert_eq!(restored, array![0, 1, 2, -2, -1]);
    }

    #[test]
    fn test_center_shift_places_zero_frequency_at_half_length() {
        let freqs = array![0, 1, 2, -2, -1];
        let centered = center_frequency_shift(&freqs, None).unwrap();
        assert_eq!(centered, array![-2, -1, 0, 1, 2]);
        assert_eq!(centered[5 / 2], 0);
    }

    #[test]
    fn test_shift_roundtrip_for_all_small_lengths() {
        for n in 1..12 {
            let data = Array1::from_iter(0..n as i32);
            let centered = center_frequency_shift(&data, None).unwrap();
            let restored = inverse_frequency_shift(&centered, None).unwrap();
            assert_eq!(restored, data, "length {n}");
        }
    }

    #[test]
    fn test_inverse_shift_only_touches_selected_axes() {
        let data = Array2::from_shape_fn((3, 4), |(i, j)| (10 * i + j) as i32);
        let shifted = inverse_frequency_shift(&data, Some(&[-1])).unwrap();
        assert_eq!(shifted.row(0).to_vec(), vec![2, 3, 0, 1]);
        assert_eq!(shifted.column(0).to_vec(), vec![2, 12, 22]);

        let both = inverse_frequency_shift(&data, None).unwrap();
        let reversed = inverse_frequency_shift(&data, Some(&[1, 0])).unwrap();
        assert_eq!(both, reversed);
        assert_eq!(both[[0, 0]], data[[1, 2]]);
    }

    #[test]
    fn test_inverse_shift_rejects_bad_axis() {
        let data = Array2::<f64>::zeros((2, 2));
        let err = inverse_frequency_shift(&data, Some(&[2])).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
