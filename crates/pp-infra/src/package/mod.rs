//! Read-only access to zip-based presentation packages (`.pptx`).

mod error;
mod ooxml;
mod xml;

pub use error::PackageError;
pub use ooxml::{rel_types, PresentationPackage, Relationship};
