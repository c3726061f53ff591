//! Algorithms over series: reducers and pointwise combination

pub mod combine;
pub mod reducer;

pub use combine::{combine, try_combine};
pub use reducer::{All, Any, Diff, Reducer, Sum};
