//! DebugInvariants: opt-in validation of internal ordering invariants.
//!
//! Mutating operations call [`DebugInvariants::debug_assert_invariants`] after
//! they finish; it only does work in debug builds or with the
//! `check-invariants`/`strict-invariants` features.

use crate::series_error::SeriesError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), SeriesError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! series_debug_assert_ok {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[series invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
