//! Error types for the cause stack manager.

use crate::frame::FrameId;
use thiserror::Error;

/// Stack protocol violations.
///
/// These signal caller misuse with no safe recovery anchor. Out-of-order frame
/// closure is not represented here: it is repaired in place and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error(
        "cause stack corruption: popped more than pushed since last frame (depth {depth}, floor {floor})"
    )]
    CauseUnderflow { depth: usize, floor: usize },

    #[error("cause stack frame corruption: attempted to pop a frame not on the frame stack ({frame})")]
    FrameNotOnStack { frame: FrameId },
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid log setting: {0}")]
    InvalidLogSetting(String),

    #[error("Logging already initialized: {0}")]
    LoggingInit(String),
}
