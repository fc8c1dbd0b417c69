//! Engine focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in reelfeed-core or the CLI.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::{SectionId, VideoId};
pub use super::interaction::{InteractionState, WatchHistory};
pub use super::layout::{
    CarouselDirection, SectionDemand, SectionDescriptor, SectionKind,
};
pub use super::video::{VideoKind, VideoRecord};
