pub mod atomic_file;
pub mod preview_cache;

pub use atomic_file::{persist_with, sibling_temp_path};
pub use preview_cache::{cache_file_name, PreviewCacheService};
