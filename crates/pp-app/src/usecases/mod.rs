pub mod discover_presentations;
pub mod generate_previews;
pub mod refresh_presentations;

pub use discover_presentations::{DiscoverError, DiscoverPresentations};
pub use generate_previews::GeneratePreviews;
pub use refresh_presentations::{RefreshOutcome, RefreshPresentations};
