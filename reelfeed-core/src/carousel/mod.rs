//! Infinite horizontal carousels.
//!
//! A [`CarouselBuffer`] replicates its source list so the rendered surface
//! can loop forever: autoplay advances the offset every frame and snaps it
//! back by exactly one replica width once it leaves the home replica. The
//! drag override is an explicit [`DragState`] machine.

pub mod buffer;
pub mod config;
pub mod state;

pub use buffer::{CarouselBuffer, Frame, replication_factor};
pub use config::CarouselConfig;
pub use state::{DragPhase, DragState, PointerEvent, Transition};
