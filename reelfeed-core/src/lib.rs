//! # Reelfeed Core
//!
//! Client-side content-distribution and playback-readiness engine for a
//! vertical video feed.
//!
//! ## Overview
//!
//! - **Ranking**: orders a raw pool into a personalized feed where unseen
//!   content always comes first
//! - **Allocation**: distributes the ranked feed over a declarative section
//!   layout without duplicating content across sections
//! - **Carousels**: replicated, wrap-around autoplay surfaces with a drag
//!   override driven by an explicit state machine
//! - **Prefetch**: warms the leading bytes of the next few assets into a
//!   bounded store
//! - **Personalization**: an injectable interest tracker feeding the ranker
//!
//! ## Architecture
//!
//! - [`ranking`]: [`Ranker`](ranking::Ranker) and its tuning
//! - [`allocation`]: [`allocate`](allocation::allocate)
//! - [`carousel`]: [`CarouselBuffer`](carousel::CarouselBuffer)
//! - [`prefetch`]: [`PrefetchCache`](prefetch::PrefetchCache) and the HTTP
//!   fetcher
//! - [`personalization`]: [`InterestTracker`](personalization::InterestTracker)
//! - [`feed`]: [`FeedPlanner`](feed::FeedPlanner), ranking and allocation in
//!   one pass
//!
//! Randomness is always injected, so seeded runs are reproducible.
//!
//! ## Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use reelfeed_contracts::interest::NoInterests;
//! use reelfeed_core::feed::FeedPlanner;
//! use reelfeed_core::ranking::{Ranker, RankerSettings};
//! use reelfeed_model::{
//!     InteractionState, SectionDescriptor, SectionId, SectionKind, VideoId,
//!     VideoKind, VideoRecord,
//! };
//!
//! let pool = vec![
//!     VideoRecord::new(VideoId::new("a").unwrap(), VideoKind::LongForm),
//!     VideoRecord::new(VideoId::new("b").unwrap(), VideoKind::LongForm),
//! ];
//! let layout = vec![SectionDescriptor::new(
//!     SectionId::new("hero").unwrap(),
//!     SectionKind::SingleLong,
//! )];
//!
//! let planner = FeedPlanner::new(Ranker::new(RankerSettings::default(), NoInterests));
//! let mut rng = StdRng::seed_from_u64(7);
//! let plan = planner.plan(&pool, &InteractionState::default(), &layout, &mut rng, false);
//!
//! assert_eq!(plan.ranked.len(), 2);
//! assert_eq!(plan.allocation.len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Section content allocation
pub mod allocation;

/// Infinite horizontal carousels
pub mod carousel;

/// Error types for settings validation and prefetch
pub mod error;

/// Feed planning facade
pub mod feed;

/// Interest tracking
pub mod personalization;

/// Convenience re-exports
pub mod prelude;

/// Byte-range prefetch cache
pub mod prefetch;

/// Personalized ranking
pub mod ranking;

pub use error::{PrefetchError, Result, SettingsError};
