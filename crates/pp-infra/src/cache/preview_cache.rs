use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pp_core::PreviewGenerationContext;
use sha2::{Digest, Sha256};

const PREVIEW_EXTENSION: &str = "png";

/// File name of the cached preview for `presentation`.
///
/// SHA-256 over the UTF-8 bytes of the path string, upper-case hex, `.png`.
/// The path is hashed as given: separators and case are not normalised, so
/// `C:\Decks\a.pptx` and `c:\decks\a.pptx` are different keys.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pp_infra::cache::cache_file_name;
///
/// let name = cache_file_name(Path::new("abc"));
/// assert_eq!(
///     name,
///     "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD.png"
/// );
/// ```
pub fn cache_file_name(presentation: &Path) -> String {
    let digest = Sha256::digest(presentation.to_string_lossy().as_bytes());
    format!("{}.{PREVIEW_EXTENSION}", hex::encode_upper(digest))
}

/// Content addresser for preview images.
///
/// Owns the cache root and hands out [`PreviewGenerationContext`]s whose
/// resolver is a pure function of the presentation path.
#[derive(Debug, Clone)]
pub struct PreviewCacheService {
    root: PathBuf,
}

impl PreviewCacheService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the cache root if it does not exist yet.
    pub fn ensure_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create preview cache dir failed: {}", self.root.display()))
    }

    pub fn cache_path_for(&self, presentation: &Path) -> PathBuf {
        self.root.join(cache_file_name(presentation))
    }

    pub fn create_context(&self) -> PreviewGenerationContext {
        let root = self.root.clone();
        PreviewGenerationContext::new(self.root.clone(), move |presentation: &Path| {
            root.join(cache_file_name(presentation))
        })
    }
}
