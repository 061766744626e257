//! # Preview Strategy Pipeline / 预览策略管线
//!
//! The strategy list is fixed when the pipeline is composed. For each
//! presentation:
//!
//! 1. a cached preview short-circuits everything;
//! 2. strategies run strictly in order, skipping those whose `can_handle`
//!    is false;
//! 3. a failure moves on to the next strategy, a success stops;
//! 4. no strategy succeeding means "no preview".
//!
//! Failed strategies are never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pp_core::ports::PreviewStrategyPort;
use pp_core::{Cancelled, PreviewGenerationContext, PreviewResult};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Ordered, immutable strategy list built once per session.
#[derive(Clone)]
pub struct PreviewStrategyFactory {
    strategies: Arc<[Arc<dyn PreviewStrategyPort>]>,
}

impl PreviewStrategyFactory {
    pub fn new(strategies: Vec<Arc<dyn PreviewStrategyPort>>) -> Self {
        Self {
            strategies: strategies.into(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn pipeline(&self, context: PreviewGenerationContext) -> PreviewPipeline {
        PreviewPipeline {
            strategies: self.strategies.clone(),
            context,
        }
    }
}

#[derive(Clone)]
pub struct PreviewPipeline {
    strategies: Arc<[Arc<dyn PreviewStrategyPort>]>,
    context: PreviewGenerationContext,
}

impl PreviewPipeline {
    /// Preview image for `path`, or `None` when no strategy produced one.
    pub async fn run(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if let Some(cached) = self.context.cached_preview(path) {
            debug!(path = %path.display(), "preview cache hit");
            return Ok(Some(cached));
        }

        for strategy in self.strategies.iter() {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            if !strategy.can_handle(path) {
                continue;
            }

            match strategy.generate(path, &self.context, cancel).await? {
                PreviewResult::Success { image_path } => {
                    debug!(path = %path.display(), strategy = strategy.name(), "preview ready");
                    return Ok(Some(image_path));
                }
                PreviewResult::Failure { error } => {
                    debug!(
                        path = %path.display(),
                        strategy = strategy.name(),
                        error = %error,
                        "strategy failed, trying next"
                    );
                }
            }
        }

        debug!(path = %path.display(), "no strategy produced a preview");
        Ok(None)
    }
}
