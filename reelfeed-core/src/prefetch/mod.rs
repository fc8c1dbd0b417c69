//! Head-of-feed byte-range warming.
//!
//! [`PrefetchCache`] takes the first few entries of a prioritized list and
//! fetches the leading chunk of each asset concurrently into a bounded,
//! insertion-ordered [`ChunkStore`]. Failures are per-entry and never reach
//! the caller.

pub mod cache;
pub mod http;
pub mod settings;
pub mod store;

pub use cache::{PrefetchCache, WarmReport};
pub use http::HttpChunkFetcher;
pub use settings::PrefetchSettings;
pub use store::ChunkStore;
