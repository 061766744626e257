//! # Refresh Presentations / 刷新演示文稿
//!
//! One batch = discovery, list publication, preview generation, preview
//! publication. Starting a batch cancels the previous one (last request wins).
//!
//! ## Publication rule / 发布规则
//!
//! Every surface update of a batch happens while holding the coordinator lock
//! and only if the batch token is still live. `begin_batch` cancels the old
//! token under the same lock, so once a newer batch has started, nothing from
//! an older batch can reach the surface, including clearing the busy flag.

use std::path::Path;
use std::sync::Arc;

use pp_core::ports::{PresentationDiscoveryPort, PresentationSurfacePort};
use pp_core::{Cancelled, PresentationEntry};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

use crate::messages;
use crate::pipeline::PreviewPipeline;
use crate::usecases::{DiscoverError, DiscoverPresentations, GeneratePreviews};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The batch published `count` presentations with their previews.
    Published { count: usize },
    /// The folder holds no presentations.
    Empty,
    /// A newer batch took over; nothing of this batch was published after that.
    Superseded,
    /// Discovery failed; status shows `message`.
    Failed { message: String },
    /// No folder has been selected yet.
    NoFolder,
    /// The selected folder does not exist (anymore).
    FolderMissing,
}

struct BatchState {
    generation: u64,
    token: CancellationToken,
    entries: Vec<PresentationEntry>,
}

pub struct RefreshPresentations {
    discover: DiscoverPresentations,
    previews: GeneratePreviews,
    surface: Arc<dyn PresentationSurfacePort>,
    state: Mutex<BatchState>,
}

impl RefreshPresentations {
    pub fn new(
        discovery: Arc<dyn PresentationDiscoveryPort>,
        pipeline: PreviewPipeline,
        surface: Arc<dyn PresentationSurfacePort>,
    ) -> Self {
        Self {
            discover: DiscoverPresentations::new(discovery),
            previews: GeneratePreviews::new(pipeline),
            surface,
            state: Mutex::new(BatchState {
                generation: 0,
                token: CancellationToken::new(),
                entries: Vec::new(),
            }),
        }
    }

    async fn begin_batch(&self) -> (u64, CancellationToken) {
        let mut state = self.state.lock().await;
        state.token.cancel();
        state.generation += 1;
        state.token = CancellationToken::new();
        (state.generation, state.token.clone())
    }

    /// Runs `publish` under the lock if `token` is still the live batch.
    async fn publish_if_current<F>(&self, token: &CancellationToken, publish: F) -> bool
    where
        F: FnOnce(&mut BatchState, &dyn PresentationSurfacePort),
    {
        let mut state = self.state.lock().await;
        if token.is_cancelled() {
            return false;
        }
        publish(&mut *state, self.surface.as_ref());
        true
    }

    /// Cancel the running batch, if any, without starting a new one.
    ///
    /// No successor will clear the busy flag, so it is cleared here together
    /// with `status`, under the same lock the batch publishes through.
    pub async fn cancel_current(&self, status: &str) {
        let state = self.state.lock().await;
        state.token.cancel();
        self.surface.set_busy(false);
        self.surface.show_status(status);
    }

    /// The list most recently published.
    pub async fn entries(&self) -> Vec<PresentationEntry> {
        self.state.lock().await.entries.clone()
    }

    pub async fn execute(&self, folder: &Path) -> RefreshOutcome {
        let (generation, token) = self.begin_batch().await;
        let span = info_span!(
            "usecase.refresh_presentations.execute",
            folder = %folder.display(),
            generation
        );

        async {
            let outcome = self.run_batch(folder, &token).await;
            info!(?outcome, "refresh finished");
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run_batch(&self, folder: &Path, token: &CancellationToken) -> RefreshOutcome {
        let started = self
            .publish_if_current(token, |_, surface| {
                surface.set_busy(true);
                surface.show_status(messages::LOADING);
            })
            .await;
        if !started {
            return RefreshOutcome::Superseded;
        }

        let items = match self.discover.execute(folder, token).await {
            Ok(items) => items,
            Err(DiscoverError::Cancelled) => return RefreshOutcome::Superseded,
            Err(err) => {
                let message = messages::unable_to_read_folder(&err.user_message());
                let published = self
                    .publish_if_current(token, |state, surface| {
                        state.entries.clear();
                        surface.show_presentations(&state.entries);
                        surface.show_status(&message);
                        surface.set_busy(false);
                    })
                    .await;
                return if published {
                    RefreshOutcome::Failed { message }
                } else {
                    RefreshOutcome::Superseded
                };
            }
        };

        let listed = self
            .publish_if_current(token, |state, surface| {
                state.entries = items
                    .iter()
                    .cloned()
                    .map(PresentationEntry::without_preview)
                    .collect();
                surface.show_presentations(&state.entries);
                if items.is_empty() {
                    surface.show_status(messages::NO_PRESENTATIONS);
                    surface.set_busy(false);
                } else {
                    surface.show_status(&messages::found(items.len()));
                }
            })
            .await;
        if !listed {
            return RefreshOutcome::Superseded;
        }
        if items.is_empty() {
            return RefreshOutcome::Empty;
        }

        let entries = match self.previews.execute(&items, token).await {
            Ok(entries) => entries,
            Err(Cancelled) => return RefreshOutcome::Superseded,
        };

        let count = entries.len();
        let published = self
            .publish_if_current(token, move |state, surface| {
                state.entries = entries;
                surface.show_previews(&state.entries);
                surface.set_busy(false);
            })
            .await;

        if published {
            RefreshOutcome::Published { count }
        } else {
            RefreshOutcome::Superseded
        }
    }
}
