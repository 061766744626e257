//! Use case for listing the presentations of a folder
//! 列出文件夹中演示文稿的用例

use std::path::Path;
use std::sync::Arc;

use pp_core::ports::{DiscoveryError, PresentationDiscoveryPort};
use pp_core::PresentationItem;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("discovery cancelled")]
    Cancelled,

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("discovery task failed: {0}")]
    Task(String),
}

impl DiscoverError {
    /// Short text for the status line: the underlying OS message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Discovery(DiscoveryError::ReadDir { source, .. }) => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Runs the discovery port on the blocking pool.
///
/// ## Behavior / 行为
/// - A missing folder yields an empty list
/// - Cancellation is observed before and after the filesystem scan; a scan
///   already running finishes in the background and its result is dropped
pub struct DiscoverPresentations {
    discovery: Arc<dyn PresentationDiscoveryPort>,
}

impl DiscoverPresentations {
    pub fn new(discovery: Arc<dyn PresentationDiscoveryPort>) -> Self {
        Self { discovery }
    }

    pub async fn execute(
        &self,
        folder: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<PresentationItem>, DiscoverError> {
        let span = info_span!("usecase.discover_presentations.execute", folder = %folder.display());

        async {
            if cancel.is_cancelled() {
                return Err(DiscoverError::Cancelled);
            }

            let discovery = self.discovery.clone();
            let folder = folder.to_path_buf();
            let scan = tokio::task::spawn_blocking(move || discovery.discover(&folder));

            let items = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DiscoverError::Cancelled),
                joined = scan => joined.map_err(|e| DiscoverError::Task(e.to_string()))??,
            };

            if cancel.is_cancelled() {
                return Err(DiscoverError::Cancelled);
            }
            debug!(count = items.len(), "discovery finished");
            Ok(items)
        }
        .instrument(span)
        .await
    }
}
