//! Analysis modules.
//!
//! Statistics and view-model derivation over the member roster.

pub mod aggregator;

pub use aggregator::*;
