pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::models::{Config, ConfigSource};
use crate::util::{non_empty_var, parse_bool};
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;

pub const CONFIG_PATH_VAR: &str = "REELFEED_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "REELFEED_CONFIG_JSON";
pub const PREFETCH_ENABLED_VAR: &str = "REELFEED_PREFETCH_ENABLED";
pub const PREFETCH_HEAD_VAR: &str = "REELFEED_PREFETCH_HEAD";
pub const SHUFFLE_ON_START_VAR: &str = "REELFEED_SHUFFLE_ON_START";

const DEFAULT_CANDIDATES: &[&str] = &[
    "reelfeed.toml",
    "reelfeed.json",
    "config/reelfeed.toml",
    "config/reelfeed.json",
];

/// A validated configuration together with its origin and any non-fatal
/// findings from the guard rails.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
}

/// Resolves [`Config`] from the process environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path` instead of consulting `$REELFEED_CONFIG_PATH`,
    /// inline JSON, or the default candidates.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Resolve, apply environment overrides, then enforce guard rails.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (mut config, source) = match &self.explicit_path {
            Some(path) => (
                Config::load_from_file(path).map_err(ConfigLoadError::Source)?,
                ConfigSource::File(path.clone()),
            ),
            None => Config::load_from_env().map_err(ConfigLoadError::Source)?,
        };

        let mut warnings = ConfigWarnings::default();
        apply_env_overrides(&mut config, &mut warnings);
        warnings.extend(apply_guard_rails(&config)?);

        info!(source = ?source, sections = config.layout.len(), "loaded reelfeed configuration");
        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }
}

impl Config {
    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$REELFEED_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$REELFEED_CONFIG_JSON` (inline JSON),
    /// 3) the first existing default file,
    /// 4) defaults if none of the above is present.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path_str) = non_empty_var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_empty_var(CONFIG_JSON_VAR) {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read reelfeed config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid reelfeed config {}", path.display())),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid reelfeed config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse without a known format: TOML first, then JSON.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse reelfeed config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid reelfeed config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}

/// Apply `REELFEED_*` overrides on top of a resolved configuration.
/// Unparsable values are reported as warnings and otherwise ignored.
pub fn apply_env_overrides(config: &mut Config, warnings: &mut ConfigWarnings) {
    if let Some(raw) = non_empty_var(PREFETCH_ENABLED_VAR) {
        match parse_bool(&raw) {
            Some(enabled) => {
                debug!(enabled, "prefetch toggled from environment");
                config.prefetch.enabled = enabled;
            }
            None => warnings.push_with_hint(
                format!("{PREFETCH_ENABLED_VAR}={raw} is not a boolean; ignored"),
                "Use one of 1/0, true/false, yes/no, on/off",
            ),
        }
    }

    if let Some(raw) = non_empty_var(PREFETCH_HEAD_VAR) {
        match raw.trim().parse::<usize>().ok() {
            Some(head) => {
                debug!(head, "prefetch head count set from environment");
                config.prefetch.head_count = head;
            }
            None => warnings.push(format!(
                "{PREFETCH_HEAD_VAR}={raw} is not a non-negative integer; ignored"
            )),
        }
    }

    if let Some(raw) = non_empty_var(SHUFFLE_ON_START_VAR) {
        match parse_bool(&raw) {
            Some(shuffle) => config.shuffle_on_start = shuffle,
            None => warnings.push_with_hint(
                format!("{SHUFFLE_ON_START_VAR}={raw} is not a boolean; ignored"),
                "Use one of 1/0, true/false, yes/no, on/off",
            ),
        }
    }
}
