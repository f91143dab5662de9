//! Numerical utilities
mod box_muller;
mod cholesky;

pub use box_muller::*;
pub use cholesky::*;
