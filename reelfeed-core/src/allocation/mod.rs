//! Partitioning of a ranked feed across the home-screen layout.

pub mod allocator;

pub use allocator::{AllocationResult, SectionBatch, allocate};
