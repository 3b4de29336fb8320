use crate::error::FilterError;

/// Resolves `axis` against an array of rank `ndim`.
///
/// Non-negative indices are taken as they are, negative ones count from the last
/// axis (`-1` is the last axis). Anything outside `-ndim..ndim` is rejected.
pub fn resolve_axis(axis: isize, ndim: usize) -> Result<usize, FilterError> {
    let rank = ndim as isize;
    let resolved = if axis < 0 { axis + rank } else { axis };
    if (0..rank).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(FilterError::invalid(format!(
            "axis {axis} is out of bounds for an array of rank {ndim}"
        )))
    }
}

/// Resolves every entry of `axes`, or all axes in order if `axes` is `None`.
pub(crate) fn resolve_axes(axes: Option<&[isize]>, ndim: usize) -> Result<Vec<usize>, FilterError> {
    match axes {
        None => Ok((0..ndim).collect()),
        Some(axes) => axes.iter().map(|&axis| resolve_axis(axis, ndim)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_axis_counts_negative_indices_from_the_end() {
        assert_eq!(resolve_axis(0, 3).unwrap(), 0);
        assert_eq!(resolve_axis(2, 3).unwrap(), 2);
        assert_eq!(resolve_axis(-1, 3).unwrap(), 2);
        assert_eq!(resolve_axis(-3, 3).unwrap(), 0);
    }

    #[test]
    fn test_resolve_axis_rejects_out_of_range() {
        assert!(resolve_axis(3, 3).unwrap_err().is_invalid_argument());
        assert!(resolve_axis(-4, 3).unwrap_err().is_invalid_argument());
        assert!(resolve_axis(0, 0).is_err());
    }

    #[test]
    fn test_resolve_axes_defaults_to_all() {
        assert_eq!(resolve_axes(None, 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(resolve_axes(Some(&[-1, 0]), 2).unwrap(), vec![1, 0]);
        assert!(resolve_axes(Some(&[0, 5]), 2).is_err());
    }
}
