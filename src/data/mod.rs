//! Data module: step series and their key ordering
#![warn(missing_docs)]

mod order;
pub mod series;

pub use series::Series;
