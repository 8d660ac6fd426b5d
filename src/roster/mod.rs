//! Member roster.
//!
//! This module holds the in-memory roster store and the seed data it is
//! populated from at startup.

pub mod seed;
pub mod store;

pub use seed::seed_trends;
pub use store::RosterStore;
