//! Carousel tuning.
//!
//! Offsets and strides are in logical pixels; speed is per animation frame
//! so the autoplay step stays pure arithmetic.

use reelfeed_model::CarouselDirection;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Sources at least this long are replicated three times; shorter ones five
/// times so a full autoplay cycle cannot run off the surface.
pub const LARGE_SOURCE_MIN_LEN: usize = 5;
pub const LARGE_SOURCE_REPLICAS: usize = 3;
pub const SMALL_SOURCE_REPLICAS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Card width plus spacing.
    pub item_stride: f32,
    /// Autoplay distance per frame (unsigned).
    pub speed_px_per_frame: f32,
    /// Autoplay direction; drags never change it.
    pub direction: CarouselDirection,
    /// Multiplier applied to pointer movement while dragging.
    pub drag_gain: f32,
    /// Pause after a drag ends before autoplay resumes (ms).
    pub release_cooldown_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_stride: 176.0,
            speed_px_per_frame: 0.5,
            direction: CarouselDirection::Forward,
            drag_gain: 1.5,
            release_cooldown_ms: 1_200,
        }
    }
}

impl CarouselConfig {
    pub fn with_direction(mut self, direction: CarouselDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Signed per-frame autoplay velocity.
    pub fn autoplay_velocity(&self) -> f32 {
        self.speed_px_per_frame * self.direction.sign()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.item_stride.is_finite() || self.item_stride <= 0.0 {
            return Err(SettingsError::Zero {
                field: "item_stride",
            });
        }
        if !self.drag_gain.is_finite() || self.drag_gain <= 0.0 {
            return Err(SettingsError::Zero { field: "drag_gain" });
        }
        if !self.speed_px_per_frame.is_finite() || self.speed_px_per_frame < 0.0
        {
            return Err(SettingsError::NegativeValue {
                field: "speed_px_per_frame",
                value: self.speed_px_per_frame,
            });
        }
        Ok(())
    }
}
