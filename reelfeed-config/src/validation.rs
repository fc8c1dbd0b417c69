use std::collections::HashSet;

use reelfeed_core::SettingsError;
use thiserror::Error;

use crate::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("invalid {section} settings: {source}")]
    InvalidSettings {
        section: &'static str,
        #[source]
        source: SettingsError,
    },
    #[error("layout section id '{id}' is used more than once")]
    DuplicateSectionId { id: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

impl Config {
    /// Reject settings that would break an engine guarantee.
    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        let section = |section: &'static str| {
            move |source: SettingsError| ConfigGuardRailError::InvalidSettings { section, source }
        };
        self.ranking.validate().map_err(section("ranking"))?;
        self.carousel.validate().map_err(section("carousel"))?;
        self.prefetch.validate().map_err(section("prefetch"))?;
        self.interests.validate().map_err(section("interests"))?;

        let mut ids = HashSet::new();
        for descriptor in &self.layout {
            if !ids.insert(descriptor.id.as_str()) {
                return Err(ConfigGuardRailError::DuplicateSectionId {
                    id: descriptor.id.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    config.validate()?;

    let mut warnings = ConfigWarnings::default();
    if config.layout.is_empty() {
        warnings.push_with_hint(
            "layout has no sections; the home feed will render nothing",
            "Add [[layout]] entries or remove the empty list to use the default layout",
        );
    }
    if !config.prefetch.enabled {
        warnings.push("prefetch disabled; every video starts cold");
    } else if config.prefetch.head_count > config.prefetch.low_watermark {
        warnings.push_with_hint(
            format!(
                "prefetch head_count {} exceeds low_watermark {}; a trim can evict chunks warmed by the same pass",
                config.prefetch.head_count, config.prefetch.low_watermark
            ),
            "Raise prefetch.low_watermark or lower prefetch.head_count",
        );
    }
    if config.ranking.tie_break_jitter == 0.0 {
        warnings.push("ranking tie-break jitter is 0; equal scores keep pool order");
    }
    Ok(warnings)
}
