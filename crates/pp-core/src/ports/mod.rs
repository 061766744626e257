//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `pp-app` and the
//! adapters in `pp-infra`, `pp-platform` and `pp-console`. The core stays
//! free of filesystem, process and terminal access.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it represents a capability that use cases depend
//! on and that an outer layer implements. Helpers that only one adapter needs
//! stay inside that adapter crate.
//!
//! Blocking ports (`PresentationDiscoveryPort`, `PresentationAutomationPort`)
//! are synchronous on purpose: callers decide where they run, normally inside
//! `tokio::task::spawn_blocking`.

pub mod app_dirs;
pub mod automation;
pub mod discovery;
pub mod display;
pub mod errors;
pub mod launcher;
pub mod preferences;
pub mod preview_strategy;
pub mod surface;

pub use app_dirs::AppDirsPort;
pub use automation::{
    AutomatedPresentation, ExportFormat, OpenOptions, PresentationAutomationPort, SlideExport,
    SlideRange, SlideShowSettings,
};
pub use discovery::PresentationDiscoveryPort;
pub use display::DisplayPort;
pub use errors::{AppDirsError, AutomationError, DiscoveryError, LaunchError, PreferencesError};
pub use launcher::PresentationLauncherPort;
pub use preferences::PreferencesPort;
pub use preview_strategy::PreviewStrategyPort;
pub use surface::PresentationSurfacePort;
