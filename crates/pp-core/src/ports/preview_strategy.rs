use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::cancel::Cancelled;
use crate::preview::{PreviewGenerationContext, PreviewResult};

/// One way of producing a preview image for a presentation.
///
/// - `can_handle` is cheap, synchronous and side-effect free (extension or
///   existence check). The pipeline skips strategies that return `false`.
/// - `generate` reports ordinary failures as [`PreviewResult::Failure`] and
///   returns `Err(Cancelled)` only when `cancel` fired. Implementations check
///   `cancel` between significant steps and release external resources first.
#[async_trait]
pub trait PreviewStrategyPort: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, path: &Path) -> bool;

    async fn generate(
        &self,
        path: &Path,
        context: &PreviewGenerationContext,
        cancel: &CancellationToken,
    ) -> Result<PreviewResult, Cancelled>;
}
