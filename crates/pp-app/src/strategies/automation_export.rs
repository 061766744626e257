use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pp_core::ports::{
    AutomationError, ExportFormat, OpenOptions, PresentationAutomationPort, PreviewStrategyPort,
    SlideExport,
};
use pp_core::{Cancelled, PreviewGenerationContext, PreviewResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::automation::AutomationSession;

const STRATEGY_NAME: &str = "automation";
pub const EXPORT_WIDTH: u32 = 960;
pub const EXPORT_HEIGHT: u32 = 540;

#[derive(Debug, Error)]
enum ExportError {
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Automation(#[from] AutomationError),

    #[error("cache write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Removes the staging file unless it was moved into the cache.
struct StagingFile {
    path: PathBuf,
    persisted: bool,
}

impl StagingFile {
    fn next_to(target: &Path) -> Self {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: target.with_file_name(format!("{name}.{}.tmp", uuid::Uuid::new_v4())),
            persisted: false,
        }
    }

    fn persist(mut self, target: &Path) -> std::io::Result<()> {
        std::fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Exports slide 1 through the external presentation application.
///
/// Applies to any existing file. Export happens on the blocking pool; the
/// automation handle is released on every path before this returns.
pub struct AutomationExportStrategy {
    automation: Arc<dyn PresentationAutomationPort>,
}

impl AutomationExportStrategy {
    pub fn new(automation: Arc<dyn PresentationAutomationPort>) -> Self {
        Self { automation }
    }
}

fn check(cancel: &CancellationToken) -> Result<(), ExportError> {
    if cancel.is_cancelled() {
        return Err(ExportError::Cancelled);
    }
    Ok(())
}

fn export_preview(
    automation: &dyn PresentationAutomationPort,
    presentation: &Path,
    target: &Path,
    cancel: &CancellationToken,
) -> Result<PathBuf, ExportError> {
    check(cancel)?;
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let staging = StagingFile::next_to(target);
    {
        let mut session =
            AutomationSession::open(automation, presentation, OpenOptions::hidden_read_only())?;
        check(cancel)?;
        session.presentation().export_slide(&SlideExport {
            slide_index: 1,
            format: ExportFormat::Png,
            width: EXPORT_WIDTH,
            height: EXPORT_HEIGHT,
            destination: staging.path.clone(),
        })?;
    }

    check(cancel)?;
    staging.persist(target)?;
    Ok(target.to_path_buf())
}

#[async_trait]
impl PreviewStrategyPort for AutomationExportStrategy {
    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn can_handle(&self, path: &Path) -> bool {
        path.is_file()
    }

    async fn generate(
        &self,
        path: &Path,
        context: &PreviewGenerationContext,
        cancel: &CancellationToken,
    ) -> Result<PreviewResult, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if let Some(cached) = context.cached_preview(path) {
            return Ok(PreviewResult::success(cached));
        }

        let automation = self.automation.clone();
        let presentation = path.to_path_buf();
        let target = context.cache_path_for(path);
        let token = cancel.clone();
        let task = tokio::task::spawn_blocking(move || {
            export_preview(&*automation, &presentation, &target, &token)
        });

        match task.await {
            Ok(Ok(image_path)) => {
                debug!(path = %path.display(), "exported preview through automation");
                Ok(PreviewResult::success(image_path))
            }
            Ok(Err(
                ExportError::Cancelled | ExportError::Automation(AutomationError::Cancelled),
            )) => Err(Cancelled),
            Ok(Err(err)) => {
                warn!(path = %path.display(), error = %err, "automation export failed");
                Ok(PreviewResult::failure(err.to_string()))
            }
            Err(join_err) => {
                warn!(
                    path = %path.display(),
                    error = %join_err,
                    "automation export task failed"
                );
                Ok(PreviewResult::failure(format!("preview task failed: {join_err}")))
            }
        }
    }
}
