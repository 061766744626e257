use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pp_core::ports::PreviewStrategyPort;
use pp_core::{Cancelled, PreviewGenerationContext, PreviewResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cache::persist_with;
use crate::package::{PackageError, PresentationPackage};

use super::placeholder::{encode_png, render_placeholder};

const STRATEGY_NAME: &str = "package_thumbnail";
const PACKAGE_EXTENSION: &str = "pptx";

#[derive(Debug, Error)]
enum ThumbnailError {
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("cache write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("placeholder encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Embedded package thumbnail, or a synthesized placeholder when the package
/// has none.
///
/// Only handles `.pptx`. Always succeeds for readable packages, which makes
/// it the terminal fallback of the pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageThumbnailStrategy;

impl PackageThumbnailStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn check(cancel: &CancellationToken) -> Result<(), ThumbnailError> {
    if cancel.is_cancelled() {
        return Err(ThumbnailError::Cancelled);
    }
    Ok(())
}

fn heading_for(presentation: &Path) -> String {
    presentation
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Blocking body: open, copy or synthesize, write into the cache.
fn build_preview(
    presentation: &Path,
    target: &Path,
    cancel: &CancellationToken,
) -> Result<PathBuf, ThumbnailError> {
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)?;
    }

    check(cancel)?;
    let mut package = PresentationPackage::open(presentation)?;

    check(cancel)?;
    if let Some(part) = package.thumbnail_part()? {
        debug!(path = %presentation.display(), part = %part, "copying embedded thumbnail");
        persist_with(target, |file| {
            package
                .copy_part(&part, file)
                .map(|_| ())
                .map_err(std::io::Error::other)
        })?;
        return Ok(target.to_path_buf());
    }

    let title = match package.first_slide_title() {
        Ok(title) => title,
        Err(err) => {
            debug!(path = %presentation.display(), error = %err, "no readable slide title");
            None
        }
    };

    check(cancel)?;
    let image = render_placeholder(&heading_for(presentation), title.as_deref());
    let bytes = encode_png(&image)?;

    check(cancel)?;
    persist_with(target, |file| file.write_all(&bytes))?;
    debug!(path = %presentation.display(), "placeholder preview written");
    Ok(target.to_path_buf())
}

#[async_trait]
impl PreviewStrategyPort for PackageThumbnailStrategy {
    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PACKAGE_EXTENSION))
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

        let presentation = path.to_path_buf();
        let target = context.cache_path_for(path);
        let token = cancel.clone();
        let task =
            tokio::task::spawn_blocking(move || build_preview(&presentation, &target, &token));

        match task.await {
            Ok(Ok(image_path)) => Ok(PreviewResult::success(image_path)),
            Ok(Err(ThumbnailError::Cancelled)) => Err(Cancelled),
            Ok(Err(err)) => {
                warn!(path = %path.display(), error = %err, "package thumbnail failed");
                Ok(PreviewResult::failure(err.to_string()))
            }
            Err(join_err) => {
                warn!(path = %path.display(), error = %join_err, "package thumbnail task failed");
                Ok(PreviewResult::failure(format!("preview task failed: {join_err}")))
            }
        }
    }
}
