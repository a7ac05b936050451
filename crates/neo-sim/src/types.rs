use serde::{Deserialize, Serialize};

use crate::points::PointId;

/// Device runtime lifecycle states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RuntimeState {
    #[default]
    Initializing = 0,
    Running = 1,
    Stopped = 2,
}

impl RuntimeState {
    /// Convert from u8
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Initializing,
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }
}

impl std::fmt::Display for RuntimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeState::Initializing => write!(f, "initializing"),
            RuntimeState::Running => write!(f, "running"),
            RuntimeState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown equipment type: {0} (expected ahu, vav0-vav5, chiller or meter)")]
    UnknownEquipment(String),

    #[error("Point not found: {0}")]
    PointNotFound(PointId),

    #[error("Point {0} is not writable")]
    NotWritable(PointId),

    #[error("Point {id} expects a {expected} value")]
    ValueType { id: PointId, expected: &'static str },

    #[error("Point layout mismatch: expected {expected} points, found {found}")]
    PointLayout { expected: usize, found: usize },

    #[error("Non-finite value in {0}")]
    NonFinite(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}
