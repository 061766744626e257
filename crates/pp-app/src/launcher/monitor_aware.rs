use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use pp_core::ports::{DisplayPort, LaunchError, PresentationLauncherPort};
use pp_core::MonitorPreference;
use tracing::debug;

/// Resolves `Automatic` from the displays attached at launch time, then
/// delegates. Explicit preferences pass through without querying displays.
pub struct MonitorAwareLauncher {
    inner: Arc<dyn PresentationLauncherPort>,
    displays: Arc<dyn DisplayPort>,
}

impl MonitorAwareLauncher {
    pub fn new(inner: Arc<dyn PresentationLauncherPort>, displays: Arc<dyn DisplayPort>) -> Self {
        Self { inner, displays }
    }
}

#[async_trait]
impl PresentationLauncherPort for MonitorAwareLauncher {
    async fn launch(&self, path: &Path, preference: MonitorPreference) -> Result<(), LaunchError> {
        let resolved = match preference {
            MonitorPreference::Automatic => {
                let resolved = preference.resolve(self.displays.has_multiple_displays());
                debug!(?resolved, "resolved automatic monitor preference");
                resolved
            }
            explicit => explicit,
        };
        self.inner.launch(path, resolved).await
    }
}
