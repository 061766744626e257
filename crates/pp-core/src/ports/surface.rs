use std::path::Path;

use crate::presentation::PresentationEntry;

/// The presentation surface (window, console, test recorder).
///
/// Calls are short and non-blocking; implementations serialize their own
/// mutation.
pub trait PresentationSurfacePort: Send + Sync {
    /// Replace the whole list. Entries carry no previews yet.
    fn show_presentations(&self, entries: &[PresentationEntry]);

    /// Replace the whole list once previews for a batch are known.
    fn show_previews(&self, entries: &[PresentationEntry]);

    fn show_status(&self, message: &str);

    fn set_busy(&self, busy: bool);

    fn show_background(&self, image: Option<&Path>);
}
