use thiserror::Error;

use crate::validation::ConfigGuardRailError;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Source(#[source] anyhow::Error),
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}
