//! Reducer trait: rules for folding per-series values at one breakpoint
//!
//! A reducer sees the interpolated value of every input series at a single
//! key, in input order, and produces the combined value. Any
//! `Fn(&[Y]) -> Y` closure is a reducer.

use num_traits::{CheckedAdd, CheckedSub, One, WrappingAdd, WrappingSub, Zero};

/// *Reducer* folds the values of `N` series at one breakpoint into one.
pub trait Reducer<Y> {
    /// Combine `values`, one per input series, in input order.
    fn reduce(&self, values: &[Y]) -> Y;

    /// Like [`reduce`](Self::reduce), but `None` when the result is not
    /// representable in `Y`.
    #[inline]
    fn try_reduce(&self, values: &[Y]) -> Option<Y> {
        Some(self.reduce(values))
    }
}

impl<Y, F> Reducer<Y> for F
where
    F: Fn(&[Y]) -> Y,
{
    #[inline]
    fn reduce(&self, values: &[Y]) -> Y {
        self(values)
    }
}

/// Arithmetic sum of all values. Wraps on overflow; `try_reduce` checks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sum;

impl<Y> Reducer<Y> for Sum
where
    Y: Copy + Zero + WrappingAdd + CheckedAdd,
{
    #[inline]
    fn reduce(&self, values: &[Y]) -> Y {
        values.iter().fold(Y::zero(), |acc, v| acc.wrapping_add(v))
    }

    #[inline]
    fn try_reduce(&self, values: &[Y]) -> Option<Y> {
        values.iter().try_fold(Y::zero(), |acc, v| acc.checked_add(v))
    }
}

/// First value minus every remaining value; zero for no values.
/// Wraps on overflow; `try_reduce` checks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Diff;

impl<Y> Reducer<Y> for Diff
where
    Y: Copy + Zero + WrappingSub + CheckedSub,
{
    #[inline]
    fn reduce(&self, values: &[Y]) -> Y {
        match values.split_first() {
            Some((&first, rest)) => rest.iter().fold(first, |acc, v| acc.wrapping_sub(v)),
            None => Y::zero(),
        }
    }

    #[inline]
    fn try_reduce(&self, values: &[Y]) -> Option<Y> {
        match values.split_first() {
            Some((&first, rest)) => rest.iter().try_fold(first, |acc, v| acc.checked_sub(v)),
            None => Some(Y::zero()),
        }
    }
}

/// One if at least one value is nonzero, else zero.
#[derive(Copy, Clone, Debug, Default)]
pub struct Any;

impl<Y> Reducer<Y> for Any
where
    Y: Zero + One,
{
    #[inline]
    fn reduce(&self, values: &[Y]) -> Y {
        if values.iter().any(|v| !v.is_zero()) {
            Y::one()
        } else {
            Y::zero()
        }
    }
}

/// One if every value is nonzero, else zero. Vacuously one for no values.
#[derive(Copy, Clone, Debug, Default)]
pub struct All;

impl<Y> Reducer<Y> for All
where
    Y: Zero + One,
{
    #[inline]
    fn reduce(&self, values: &[Y]) -> Y {
        if values.iter().all(|v| !v.is_zero()) {
            Y::one()
        } else {
            Y::zero()
        }
    }
}
