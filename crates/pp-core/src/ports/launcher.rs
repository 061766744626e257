use std::path::Path;

use async_trait::async_trait;

use crate::ports::errors::LaunchError;
use crate::preferences::MonitorPreference;

/// Starts a slideshow for one presentation.
///
/// Completes once the show has been started; failures are reported, never retried.
#[async_trait]
pub trait PresentationLauncherPort: Send + Sync {
    async fn launch(&self, path: &Path, preference: MonitorPreference) -> Result<(), LaunchError>;
}
