//! Configuration for the reelfeed engine.
//!
//! One [`Config`] carries the tuning of every engine component plus the
//! home layout. [`ConfigLoader`] resolves it from a file, inline JSON in the
//! environment, or built-in defaults, applies environment overrides, and
//! runs the guard rails in [`validation`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{Config, ConfigSource, default_layout};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
