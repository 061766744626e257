//! Preview outcomes and the per-session generation context.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maps a presentation path to the deterministic location of its cached preview.
pub type CachePathResolver = Arc<dyn Fn(&Path) -> PathBuf + Send + Sync>;

/// Shared, read-only inputs every preview strategy needs.
///
/// Created once per session and cloned cheaply into concurrent tasks.
#[derive(Clone)]
pub struct PreviewGenerationContext {
    cache_directory: PathBuf,
    resolver: CachePathResolver,
}

impl PreviewGenerationContext {
    pub fn new<F>(cache_directory: impl Into<PathBuf>, resolver: F) -> Self
    where
        F: Fn(&Path) -> PathBuf + Send + Sync + 'static,
    {
        Self {
            cache_directory: cache_directory.into(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    pub fn cache_path_for(&self, presentation: &Path) -> PathBuf {
        (self.resolver)(presentation)
    }

    /// Returns the cache path when a preview for `presentation` is already on disk.
    ///
    /// This is the only filesystem access in this crate: a single metadata lookup.
    pub fn cached_preview(&self, presentation: &Path) -> Option<PathBuf> {
        let path = self.cache_path_for(presentation);
        path.is_file().then_some(path)
    }
}

impl fmt::Debug for PreviewGenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewGenerationContext")
            .field("cache_directory", &self.cache_directory)
            .finish_non_exhaustive()
    }
}

/// Outcome of one preview strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewResult {
    /// The preview image was written to (or already existed at) `image_path`.
    Success { image_path: PathBuf },
    /// The strategy could not produce a preview; `error` is short and human readable.
    Failure { error: String },
}

impl PreviewResult {
    pub fn success(image_path: impl Into<PathBuf>) -> Self {
        Self::Success {
            image_path: image_path.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn image_path(&self) -> Option<&Path> {
        match self {
            Self::Success { image_path } => Some(image_path),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn into_image_path(self) -> Option<PathBuf> {
        match self {
            Self::Success { image_path } => Some(image_path),
            Self::Failure { .. } => None,
        }
    }
}
