//! # pp-platform
//!
//! Host adapters: per-user directories, display detection and the
//! out-of-process office suite automation.

pub mod app_dirs;
pub mod automation;
pub mod display;

pub use app_dirs::DirsAppDirsAdapter;
pub use automation::OfficeProcessAutomation;
pub use display::SystemDisplays;
