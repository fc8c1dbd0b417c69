//! Trait surfaces that describe the engine's external collaborators.

pub mod fetch;
pub mod interest;

/// Frequently used trait combinators for the engine and its adapters.
pub mod prelude {
    pub use super::fetch::{ChunkFetchError, ChunkFetcher, ChunkRequest};
    pub use super::interest::{InterestSource, NoInterests};
}
