//! Presentation identity and display ordering.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Extensions (lower-case, without the dot) recognised as presentations.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pptx", "ppt", "ppsx", "pps"];

/// A presentation file available for playback.
///
/// Identity is the file path; the display name is derived from the file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresentationItem {
    file_path: PathBuf,
    display_name: String,
}

impl PresentationItem {
    pub fn new(file_path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            display_name: display_name.into(),
        }
    }

    /// Builds an item whose display name is the file stem of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let file_path = path.into();
        let display_name = file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_path,
            display_name,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// A discovered presentation together with its preview image, if one was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationEntry {
    pub item: PresentationItem,
    pub preview: Option<PathBuf>,
}

impl PresentationEntry {
    pub fn without_preview(item: PresentationItem) -> Self {
        Self {
            item,
            preview: None,
        }
    }
}

/// Returns `true` when the extension of `path` is one of [`SUPPORTED_EXTENSIONS`],
/// compared case-insensitively.
pub fn is_supported_presentation(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Case-insensitive ordering of display names.
///
/// Names are compared by their Unicode lower-case form; names that differ only
/// in case fall back to the raw comparison so the order stays total.
pub fn compare_display_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts items ascending by display name using [`compare_display_names`].
pub fn sort_for_display(items: &mut [PresentationItem]) {
    items.sort_by(|a, b| compare_display_names(a.display_name(), b.display_name()));
}
