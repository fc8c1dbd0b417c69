//! Core data model definitions shared across reelfeed crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod interaction;
pub mod layout;
pub mod prelude;
pub mod video;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{SectionId, VideoId};
pub use interaction::{InteractionState, WatchEntry, WatchHistory};
pub use layout::{
    CarouselDirection, SectionDemand, SectionDescriptor, SectionKind,
};
pub use video::{VideoKind, VideoRecord};
