//! SeriesError: Unified error type for step-series public APIs
//!
//! Ordinary container operations never fail; absence is reported through
//! `Option`. This type covers invariant validation and checked combination.

use thiserror::Error;

/// Unified error type for step-series operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// A key in the sorted index has no stored point.
    #[error("Order error: sorted key `{0}` is not a stored point")]
    SortedKeyNotStored(String),
    /// A key in the pending buffer has no stored point.
    #[error("Order error: pending key `{0}` is not a stored point")]
    PendingKeyNotStored(String),
    /// A key is tracked more than once across sorted and pending.
    #[error("Order error: key `{0}` is tracked more than once")]
    DuplicateKey(String),
    /// A stored point is tracked by neither sorted nor pending.
    #[error("Order error: stored key `{0}` is in neither sorted nor pending")]
    UntrackedKey(String),
    /// Two adjacent sorted keys are not strictly ascending.
    #[error("Order error: sorted keys out of order (`{prev}` is not < `{next}`)")]
    SortedOutOfOrder { prev: String, next: String },
    /// A reducer could not represent its result at a breakpoint.
    #[error("Combine error: reducer overflowed at breakpoint `{at}`")]
    ReducerOverflow { at: String },
}
