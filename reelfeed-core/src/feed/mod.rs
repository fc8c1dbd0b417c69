//! Ranker and allocator composed into a single feed pass.

pub mod planner;

pub use planner::{FeedPlan, FeedPlanner};
