#![cfg_attr(docsrs, feature(doc_cfg))]
//! # step-series
//!
//! step-series models a discrete step function over an ordered key domain. A sparse set of
//! `(x, y)` breakpoints defines `f(x) = y` at each stored `x`; for any other `x`, `f(x)` is the
//! value at the nearest stored `x₀ ≤ x`, or zero if there is none.
//!
//! ## Features
//! - [`Series`]: breakpoint storage with cheap bulk inserts and lazily sorted ordered reads
//!   (`get`, `floor`, `ceiling`, `xs`), plus `remove`, `compact`, deep copy and exact equality
//! - [`combine`](algs::combine::combine): pointwise combination of any number of series with a
//!   [`Reducer`](algs::reducer::Reducer) such as [`Sum`](algs::reducer::Sum),
//!   [`Diff`](algs::reducer::Diff), [`Any`](algs::reducer::Any) or [`All`](algs::reducer::All)
//! - Serde support; the serialized form is the ascending breakpoint map
//!
//! ## Usage
//!
//! ```rust
//! use step_series::prelude::*;
//!
//! let a: Series = Series::from_points([(-5, 3), (0, 0), (123, 1)]);
//! let b: Series = Series::from_points([(-10, 1), (0, 2), (50, 0)]);
//! let mut any = combine(&Any, &[&a, &b]);
//! any.compact();
//! assert_eq!(any.points(), vec![(-10, 1), (50, 0), (123, 1)]);
//! ```
//!
//! ## Concurrency
//!
//! Ordered reads merge buffered keys behind `&self`, so a [`Series`] is `Send` but not `Sync`.
//! Share one across threads only behind a lock.
//!
//! ## Invariant checking
//!
//! Every mutation re-validates the internal ordering in debug builds. Enable the
//! `check-invariants` feature to keep those checks in release builds.

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod series_error;

pub use data::series::Series;
pub use debug_invariants::DebugInvariants;
pub use series_error::SeriesError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::combine::{combine, try_combine};
    pub use crate::algs::reducer::{All, Any, Diff, Reducer, Sum};
    pub use crate::data::series::Series;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::series_error::SeriesError;
}
