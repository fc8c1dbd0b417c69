use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

pub const DEFAULT_HEAD_COUNT: usize = 4;
pub const DEFAULT_CHUNK_SIZE: u64 = 2 * 1024 * 1024;
pub const DEFAULT_MAX_ENTRIES: usize = 50;
pub const DEFAULT_LOW_WATERMARK: usize = 20;

/// Prefetch tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrefetchSettings {
    /// Master switch; a disabled cache accepts warm calls and does nothing.
    pub enabled: bool,
    /// How many entries from the head of the list are warmed.
    pub head_count: usize,
    /// Leading bytes fetched per asset.
    pub chunk_size: u64,
    /// Maintenance trims the store once it holds more keys than this.
    pub max_entries: usize,
    /// Key count left after a trim.
    pub low_watermark: usize,
    /// Period of the background maintenance task (ms). `None` runs
    /// maintenance only after each warm.
    pub maintenance_interval_ms: Option<u64>,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            head_count: DEFAULT_HEAD_COUNT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_entries: DEFAULT_MAX_ENTRIES,
            low_watermark: DEFAULT_LOW_WATERMARK,
            maintenance_interval_ms: None,
        }
    }
}

impl PrefetchSettings {
    pub fn validate(&self) -> Result<()> {
        if self.head_count == 0 {
            return Err(SettingsError::Zero {
                field: "head_count",
            });
        }
        if self.chunk_size == 0 {
            return Err(SettingsError::Zero {
                field: "chunk_size",
            });
        }
        if self.max_entries == 0 {
            return Err(SettingsError::Zero {
                field: "max_entries",
            });
        }
        if self.low_watermark >= self.max_entries {
            return Err(SettingsError::WatermarkAboveCeiling {
                low_watermark: self.low_watermark,
                max_entries: self.max_entries,
            });
        }
        if self.maintenance_interval_ms == Some(0) {
            return Err(SettingsError::Zero {
                field: "maintenance_interval_ms",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = PrefetchSettings::default();
        assert_eq!(settings.chunk_size, 2_097_152);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn watermark_must_sit_below_ceiling() {
        let settings = PrefetchSettings {
            max_entries: 10,
            low_watermark: 10,
            ..PrefetchSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::WatermarkAboveCeiling {
                low_watermark: 10,
                max_entries: 10
            })
        );
    }

    #[test]
    fn zero_head_is_rejected() {
        let settings = PrefetchSettings {
            head_count: 0,
            ..PrefetchSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Zero { field: "head_count" })
        ));
    }
}
