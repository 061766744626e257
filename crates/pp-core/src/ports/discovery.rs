use std::path::Path;

use crate::ports::errors::DiscoveryError;
use crate::presentation::PresentationItem;

/// Lists the presentations directly inside a folder.
///
/// Implementations block on the filesystem. A missing folder is not an error
/// and yields an empty list; the result is sorted for display.
pub trait PresentationDiscoveryPort: Send + Sync {
    fn discover(&self, folder: &Path) -> Result<Vec<PresentationItem>, DiscoveryError>;
}
