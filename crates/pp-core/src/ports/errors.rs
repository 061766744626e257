use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory unavailable")]
    DataLocalDirUnavailable,

    #[error("system cache directory unavailable")]
    CacheDirUnavailable,

    #[error("system config directory unavailable")]
    ConfigDirUnavailable,
}

/// Failures of the external presentation application.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// The application is not installed or could not be started.
    #[error("presentation automation unavailable: {0}")]
    Unavailable(String),

    /// The application started but the requested operation failed.
    #[error("presentation automation failed: {0}")]
    Faulted(String),

    #[error("presentation automation cancelled")]
    Cancelled,

    #[error("presentation automation I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read folder {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("presentation not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Automation(#[from] AutomationError),

    #[error("launch task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to read preferences at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preferences at {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}
