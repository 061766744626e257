//! # pp-app
//!
//! Use cases and orchestration for PowerPresenter: preview strategies that
//! need the automation port, the strategy pipeline, discovery and preview
//! batches, launchers, preferences and the presenter session.

pub mod automation;
pub mod deps;
pub mod launcher;
pub mod messages;
pub mod pipeline;
pub mod preferences;
pub mod session;
pub mod strategies;
pub mod usecases;

pub use deps::AppDeps;
pub use launcher::{AutomationLauncher, MonitorAwareLauncher};
pub use pipeline::{PreviewPipeline, PreviewStrategyFactory};
pub use preferences::PreferencesService;
pub use session::PresenterSession;
pub use strategies::AutomationExportStrategy;
pub use usecases::{DiscoverPresentations, GeneratePreviews, RefreshOutcome, RefreshPresentations};
