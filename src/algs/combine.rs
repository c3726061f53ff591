//! Pointwise combination of several series into one.
//!
//! The result has a breakpoint at every key stored in *any* input, and its
//! value there is the reducer applied to each input's interpolated value
//! [`Series::get`] at that key, in input order. Combination often produces
//! runs of equal values; call [`Series::compact`] on the result for a
//! minimal representation.

use crate::algs::reducer::Reducer;
use crate::data::series::Series;
use crate::series_error::SeriesError;
use itertools::Itertools;
use num_traits::Zero;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;

/// Combine `series` pointwise with `reducer`.
///
/// Combining zero series yields an empty series, whatever the reducer.
///
/// # Example
/// ```rust
/// use step_series::algs::combine::combine;
/// use step_series::algs::reducer::Sum;
/// use step_series::data::series::Series;
/// let a: Series = Series::from_points([(-5, 3), (0, 0), (123, 1)]);
/// let b: Series = Series::from_points([(-10, 1), (0, 2), (50, 0)]);
/// let sum = combine(&Sum, &[&a, &b]);
/// assert_eq!(sum.points(), vec![(-10, 1), (-5, 4), (0, 2), (50, 0), (123, 1)]);
/// ```
///
/// # Complexity
/// **O(K · N · log n)** for `K` unioned keys over `N` inputs, plus one merge
/// per input that still has pending keys.
pub fn combine<X, Y, R>(reducer: &R, series: &[&Series<X, Y>]) -> Series<X, Y>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
    R: Reducer<Y> + ?Sized,
{
    match combine_by(series, |_, values| Ok::<_, Infallible>(reducer.reduce(values))) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Combine `series` pointwise with `reducer`, failing on overflow.
///
/// # Errors
/// Returns `Err(SeriesError::ReducerOverflow { at })` for the first key, in
/// ascending order, where [`Reducer::try_reduce`] reports an unrepresentable
/// result.
pub fn try_combine<X, Y, R>(
    reducer: &R,
    series: &[&Series<X, Y>],
) -> Result<Series<X, Y>, SeriesError>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
    R: Reducer<Y> + ?Sized,
{
    combine_by(series, |x, values| {
        reducer.try_reduce(values).ok_or_else(|| {
            log::warn!("reducer overflowed at breakpoint {x:?}");
            SeriesError::ReducerOverflow {
                at: format!("{x:?}"),
            }
        })
    })
}

fn combine_by<X, Y, E, F>(series: &[&Series<X, Y>], mut eval: F) -> Result<Series<X, Y>, E>
where
    X: Copy + Ord + Hash + Debug,
    Y: Copy + PartialEq + Zero,
    F: FnMut(X, &[Y]) -> Result<Y, E>,
{
    // each xs() is ascending, so a k-way merge yields the ascending union
    let keys: Vec<X> = series.iter().map(|s| s.xs()).kmerge().dedup().collect();

    let mut values = Vec::with_capacity(series.len());
    let mut points = Vec::with_capacity(keys.len());
    for x in keys {
        values.clear();
        values.extend(series.iter().map(|s| s.get(x)));
        points.push((x, eval(x, &values)?));
    }

    log::debug!(
        "combined {} series into {} breakpoints",
        series.len(),
        points.len()
    );
    Ok(Series::from_sorted_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::reducer::{All, Any, Diff, Sum};

    #[test]
    fn zero_inputs_yield_empty_series() {
        let none: [&Series; 0] = [];
        assert!(combine(&Sum, &none).is_empty());
        assert!(combine(&All, &none).is_empty());
        assert!(try_combine(&Diff, &none).unwrap().is_empty());
    }

    #[test]
    fn single_input_is_reproduced_by_sum() {
        let a: Series = Series::from_points([(3, 1), (-1, 4)]);
        let out = combine(&Sum, &[&a]);
        assert_eq!(out, a);
        assert_eq!(out.pending_len(), 0);
    }

    #[test]
    fn uses_interpolated_values_of_other_inputs() {
        let a: Series = Series::from_points([(0, 10)]);
        let b: Series = Series::from_points([(5, 1)]);
        let out = combine(&Diff, &[&a, &b]);
        assert_eq!(out.points(), vec![(0, 10), (5, 9)]);
        let out = combine(&Diff, &[&b, &a]);
        assert_eq!(out.points(), vec![(0, -10), (5, -9)]);
    }

    #[test]
    fn any_with_no_nonzero_input() {
        let a: Series = Series::from_points([(1, 0)]);
        let out = combine(&Any, &[&a, &a]);
        assert_eq!(out.points(), vec![(1, 0)]);
    }

    #[test]
    fn try_combine_reports_first_overflow() {
        let a: Series = Series::from_points([(0, 1), (1, i64::MAX), (2, i64::MAX)]);
        let b: Series = Series::from_points([(0, 1)]);
        let err = try_combine(&Sum, &[&a, &b]).unwrap_err();
        assert_eq!(err, SeriesError::ReducerOverflow { at: "1".into() });

        let wrapped = combine(&Sum, &[&a, &b]);
        assert_eq!(wrapped.get(1), i64::MIN);
    }

    #[test]
    fn try_combine_matches_combine_in_range() {
        let a: Series = Series::from_points([(-5, 3), (0, 0), (123, 1)]);
        let b: Series = Series::from_points([(-10, 1), (0, 2), (50, 0)]);
        assert_eq!(try_combine(&Diff, &[&a, &b]).unwrap(), combine(&Diff, &[&a, &b]));
    }

    #[test]
    fn closure_reducer() {
        let a: Series = Series::from_points([(0, 2), (4, 8)]);
        let b: Series = Series::from_points([(2, 5)]);
        let max = |v: &[i64]| v.iter().copied().max().unwrap_or(0);
        let out = combine(&max, &[&a, &b]);
        assert_eq!(out.points(), vec![(0, 2), (2, 5), (4, 8)]);
    }
}
