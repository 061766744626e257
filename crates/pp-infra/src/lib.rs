//! # pp-infra
//!
//! Filesystem and file-format adapters: the preview cache, folder discovery,
//! the JSON preferences repository, the presentation package reader and the
//! package-thumbnail preview strategy.

pub mod cache;
pub mod discovery;
pub mod package;
pub mod preferences;
pub mod preview;

pub use cache::PreviewCacheService;
pub use discovery::FsPresentationDiscovery;
pub use preferences::FilePreferencesRepository;
pub use preview::PackageThumbnailStrategy;
