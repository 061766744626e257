use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use pp_core::ports::{
    LaunchError, OpenOptions, PresentationAutomationPort, PresentationLauncherPort,
    SlideShowSettings,
};
use pp_core::MonitorPreference;
use tracing::{info, info_span, Instrument};

use crate::automation::AutomationSession;

/// Starts a slideshow through the external presentation application.
///
/// The document stays open for the running show; the automation handle is
/// released once the show has started.
pub struct AutomationLauncher {
    automation: Arc<dyn PresentationAutomationPort>,
}

impl AutomationLauncher {
    pub fn new(automation: Arc<dyn PresentationAutomationPort>) -> Self {
        Self { automation }
    }
}

#[async_trait]
impl PresentationLauncherPort for AutomationLauncher {
    async fn launch(&self, path: &Path, preference: MonitorPreference) -> Result<(), LaunchError> {
        let span = info_span!(
            "launcher.automation.launch",
            path = %path.display(),
            preference = ?preference
        );

        async {
            if !path.is_file() {
                return Err(LaunchError::NotFound(path.to_path_buf()));
            }

            let automation = self.automation.clone();
            let presentation = path.to_path_buf();
            let settings = SlideShowSettings::for_preference(preference);

            tokio::task::spawn_blocking(move || -> Result<(), LaunchError> {
                let mut session = AutomationSession::open(
                    &*automation,
                    &presentation,
                    OpenOptions::hidden_read_only(),
                )?;
                session.presentation().run_slideshow(&settings)?;
                session.leave_open();
                Ok(())
            })
            .await
            .map_err(|e| LaunchError::Task(e.to_string()))??;

            info!(presenter_view = settings.presenter_view, "slideshow launched");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
