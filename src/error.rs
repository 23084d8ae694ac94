//! Startup error types
//!
//! Both kinds are fatal for the launch attempt; gameplay never produces errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to produce a valid `Settings` record
#[derive(Debug)]
pub enum ConfigError {
    /// Config file does not exist
    NotFound { path: PathBuf },
    /// Config file exists but could not be read
    Io { path: PathBuf, source: io::Error },
    /// Not JSON, or a required field is missing / has the wrong type
    Malformed(serde_json::Error),
    /// Field parsed but its value is out of range
    Invalid { field: &'static str, reason: String },
    /// Requested difficulty is not defined in the config
    UnknownDifficulty { requested: String, available: Vec<String> },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "config file not found: {}", path.display())
            }
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Malformed(err) => write!(f, "malformed config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{}`: {}", field, reason)
            }
            ConfigError::UnknownDifficulty {
                requested,
                available,
            } => write!(
                f,
                "unknown difficulty '{}'. Available: {}",
                requested,
                available.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err)
    }
}

/// Failure to load or write a level layout file
#[derive(Debug)]
pub enum LevelLoadError {
    /// Layout file does not exist
    NotFound { path: PathBuf },
    /// Layout file could not be read or written
    Io { path: PathBuf, source: io::Error },
    /// Document is not valid JSON
    Malformed(serde_json::Error),
    /// Document has no `bricks` list
    MissingBricks,
    /// A brick descriptor is incomplete or carries unusable values
    InvalidBrick { index: usize, reason: String },
}

impl fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelLoadError::NotFound { path } => {
                write!(f, "level file not found: {}", path.display())
            }
            LevelLoadError::Io { path, source } => {
                write!(f, "level file {}: {}", path.display(), source)
            }
            LevelLoadError::Malformed(err) => write!(f, "malformed level file: {}", err),
            LevelLoadError::MissingBricks => {
                write!(f, "level file must contain a 'bricks' list")
            }
            LevelLoadError::InvalidBrick { index, reason } => {
                write!(f, "invalid brick entry #{}: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for LevelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelLoadError::Io { source, .. } => Some(source),
            LevelLoadError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelLoadError {
    fn from(err: serde_json::Error) -> Self {
        LevelLoadError::Malformed(err)
    }
}
