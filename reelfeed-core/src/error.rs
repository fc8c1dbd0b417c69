use thiserror::Error;

pub use reelfeed_contracts::fetch::ChunkFetchError as PrefetchError;

/// Rejected engine tuning. Produced by the `validate` methods on the
/// settings structs so bad configuration is caught at load time instead of
/// silently breaking an ordering guarantee.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error(
        "tie-break jitter {jitter} must be smaller than the smallest score tier gap {gap}"
    )]
    JitterTooLarge { jitter: f32, gap: f32 },

    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error(
        "low watermark {low_watermark} must be below the entry ceiling {max_entries}"
    )]
    WatermarkAboveCeiling {
        low_watermark: usize,
        max_entries: usize,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
