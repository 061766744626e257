//! # pp-core
//!
//! Core domain models and port contracts for PowerPresenter.
//!
//! This crate contains pure business types without any infrastructure dependencies.

pub mod app_dirs;
pub mod cancel;
pub mod config;
pub mod ports;
pub mod preferences;
pub mod presentation;
pub mod preview;

// Re-export commonly used types at the crate root
pub use app_dirs::AppDirs;
pub use cancel::Cancelled;
pub use config::AppConfig;
pub use preferences::{MonitorPreference, UserPreferences};
pub use presentation::{PresentationEntry, PresentationItem, SUPPORTED_EXTENSIONS};
pub use preview::{CachePathResolver, PreviewGenerationContext, PreviewResult};
