//! Explicit, injectable interest state.

pub mod interests;

pub use interests::{InterestEntry, InterestSettings, InterestSnapshot, InterestTracker};
