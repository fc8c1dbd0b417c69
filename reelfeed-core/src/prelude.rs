//! Most-used engine types in one import.

pub use crate::allocation::{AllocationResult, SectionBatch, allocate};
pub use crate::carousel::{
    CarouselBuffer, CarouselConfig, DragPhase, DragState, Frame, PointerEvent,
    Transition,
};
pub use crate::error::{PrefetchError, SettingsError};
pub use crate::feed::{FeedPlan, FeedPlanner};
pub use crate::personalization::{InterestSettings, InterestTracker};
pub use crate::prefetch::{
    ChunkStore, HttpChunkFetcher, PrefetchCache, PrefetchSettings, WarmReport,
};
pub use crate::ranking::{RankOptions, RankedEntry, Ranker, RankerSettings};

pub use reelfeed_contracts::prelude::*;
pub use reelfeed_model::prelude::*;
