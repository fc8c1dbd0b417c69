use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Score weights for the ranker.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RankerSettings {
    /// Added when a video's category is one of the user's top interests.
    pub interest_bonus: f32,
    /// Added when a video is flagged as trending.
    pub trending_bonus: f32,
    /// Upper bound (exclusive) of the random tie-breaker. Zero disables it.
    pub tie_break_jitter: f32,
    /// Watch progress above which a video counts as seen.
    pub seen_progress_threshold: f32,
}

impl Default for RankerSettings {
    fn default() -> Self {
        Self {
            interest_bonus: 10.0,
            trending_bonus: 5.0,
            tie_break_jitter: 1.0,
            seen_progress_threshold: 0.1,
        }
    }
}

impl RankerSettings {
    /// Settings with the tie-breaker disabled, so equal-tier videos keep
    /// their pool order.
    pub fn deterministic() -> Self {
        Self {
            tie_break_jitter: 0.0,
            ..Self::default()
        }
    }

    /// Smallest distance between two distinct score tiers, or `None` when
    /// every video lands in the same tier.
    pub fn min_tier_gap(&self) -> Option<f32> {
        let mut tiers = [
            0.0,
            self.trending_bonus,
            self.interest_bonus,
            self.trending_bonus + self.interest_bonus,
        ];
        tiers.sort_by(f32::total_cmp);
        tiers
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|gap| *gap > 0.0)
            .min_by(f32::total_cmp)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("interest_bonus", self.interest_bonus),
            ("trending_bonus", self.trending_bonus),
            ("tie_break_jitter", self.tie_break_jitter),
            ("seen_progress_threshold", self.seen_progress_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::NegativeValue { field, value });
            }
        }

        if let Some(gap) = self.min_tier_gap()
            && self.tie_break_jitter >= gap
        {
            return Err(SettingsError::JitterTooLarge {
                jitter: self.tie_break_jitter,
                gap,
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
        assert!(RankerSettings::default().validate().is_ok());
        assert!(RankerSettings::deterministic().validate().is_ok());
    }

    #[test]
    fn jitter_must_stay_inside_a_tier() {
        let settings = RankerSettings {
            interest_bonus: 10.0,
            trending_bonus: 8.0,
            tie_break_jitter: 2.5,
            ..RankerSettings::default()
        };
        // Tiers are 0, 8, 10, 18: the 8 -> 10 step is the tightest.
        assert_eq!(settings.min_tier_gap(), Some(2.0));
        assert_eq!(
            settings.validate(),
            Err(SettingsError::JitterTooLarge {
                jitter: 2.5,
                gap: 2.0
            })
        );
    }

    #[test]
    fn single_tier_accepts_any_jitter() {
        let settings = RankerSettings {
            interest_bonus: 0.0,
            trending_bonus: 0.0,
            tie_break_jitter: 100.0,
            ..RankerSettings::default()
        };
        assert_eq!(settings.min_tier_gap(), None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn negative_weights_are_rejected() {
        let settings = RankerSettings {
            trending_bonus: -1.0,
            ..RankerSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NegativeValue {
                field: "trending_bonus",
                ..
            })
        ));
    }
}
