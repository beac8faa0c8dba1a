//! Configuration System
//!
//! Startup configuration for the cause stack manager. Values are layered from
//! built-in defaults, the global config file, an optional explicit file, and
//! `CAUSESTACK_*` environment variables, highest last. The result is read
//! once; managers copy what they need at construction.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CauseStackConfig {
    /// Capture a backtrace whenever a frame is opened so out-of-order closure
    /// can report where the leaked frames came from.
    #[serde(default)]
    pub debug_frames: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CauseStackConfig {
    /// Load configuration from defaults, the global file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::load(None)
    }

    /// Like [`load`](Self::load), with `path` layered above the global file.
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        ConfigLoader::load(Some(path))
    }
}

/// Builds a [`CauseStackConfig`] from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(explicit_file: Option<&Path>) -> Result<CauseStackConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = match explicit_file {
            Some(path) => sources::explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = sources::environment::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load a single file over the defaults, ignoring the global file and
    /// the environment.
    pub fn load_from_file(path: &Path) -> Result<CauseStackConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn global_config_path() -> Option<std::path::PathBuf> {
        sources::global_file::global_config_path()
    }
}
