//! Use case for producing previews for a discovered set
//! 为一组演示文稿生成预览的用例

use pp_core::{Cancelled, PresentationEntry, PresentationItem};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument};

use crate::pipeline::PreviewPipeline;

/// Fans the pipeline out over a batch, one task per presentation.
///
/// ## Behavior / 行为
/// - Tasks share only the read-only pipeline and the batch token
/// - Results come back in input order regardless of completion order
/// - A failed or panicked item gets no preview; the others are unaffected
/// - Cancelling the token aborts every task and returns `Err(Cancelled)`
pub struct GeneratePreviews {
    pipeline: PreviewPipeline,
}

impl GeneratePreviews {
    pub fn new(pipeline: PreviewPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn execute(
        &self,
        items: &[PresentationItem],
        cancel: &CancellationToken,
    ) -> Result<Vec<PresentationEntry>, Cancelled> {
        let span = info_span!("usecase.generate_previews.execute", count = items.len());

        async {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }

            let mut tasks = JoinSet::new();
            for (index, item) in items.iter().cloned().enumerate() {
                let pipeline = self.pipeline.clone();
                let token = cancel.clone();
                tasks.spawn(async move {
                    let preview = pipeline.run(item.file_path(), &token).await;
                    (index, preview)
                });
            }

            let mut previews = vec![None; items.len()];
            loop {
                let joined = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tasks.abort_all();
                        return Err(Cancelled);
                    }
                    joined = tasks.join_next() => joined,
                };

                match joined {
                    None => break,
                    Some(Ok((index, Ok(preview)))) => previews[index] = preview,
                    Some(Ok((_, Err(Cancelled)))) => {
                        tasks.abort_all();
                        return Err(Cancelled);
                    }
                    Some(Err(err)) => warn!(error = %err, "preview task failed"),
                }
            }

            let ready = previews.iter().filter(|p| p.is_some()).count();
            debug!(ready, total = items.len(), "preview batch finished");

            Ok(items
                .iter()
                .cloned()
                .zip(previews)
                .map(|(item, preview)| PresentationEntry { item, preview })
                .collect())
        }
        .instrument(span)
        .await
    }
}
