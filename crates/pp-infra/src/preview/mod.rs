mod glyphs;
pub mod placeholder;
mod thumbnail_strategy;

pub use placeholder::{render_placeholder, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
pub use thumbnail_strategy::PackageThumbnailStrategy;
