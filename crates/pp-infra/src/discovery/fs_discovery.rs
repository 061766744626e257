use std::io;
use std::path::Path;

use pp_core::ports::{DiscoveryError, PresentationDiscoveryPort};
use pp_core::presentation::{is_supported_presentation, sort_for_display};
use pp_core::PresentationItem;
use tracing::{debug, warn};

/// Lists presentations directly inside a folder (no recursion).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPresentationDiscovery;

impl FsPresentationDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl PresentationDiscoveryPort for FsPresentationDiscovery {
    fn discover(&self, folder: &Path) -> Result<Vec<PresentationItem>, DiscoveryError> {
        let folder = std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf());

        if !folder.is_dir() {
            debug!(folder = %folder.display(), "folder does not exist, nothing to discover");
            return Ok(Vec::new());
        }

        let entries = match std::fs::read_dir(&folder) {
            Ok(entries) => entries,
            // Removed between the check and the listing.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(DiscoveryError::ReadDir {
                    path: folder,
                    source,
                })
            }
        };

        let mut items = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(folder = %folder.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            // Follows symlinks.
            if path.is_file() && is_supported_presentation(&path) {
                items.push(PresentationItem::from_path(path));
            }
        }

        sort_for_display(&mut items);
        debug!(folder = %folder.display(), count = items.len(), "discovered presentations");
        Ok(items)
    }
}
