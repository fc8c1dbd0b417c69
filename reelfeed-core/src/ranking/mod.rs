//! Personalized feed ordering.
//!
//! The ranker turns the raw pool into a feed where every unseen video comes
//! before any video the user has already interacted with.

pub mod ranker;
pub mod settings;

pub use ranker::{RankOptions, RankedEntry, Ranker};
pub use settings::RankerSettings;
