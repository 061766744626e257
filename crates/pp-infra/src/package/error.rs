use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("package I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid package archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("part not found: {0}")]
    MissingPart(String),
}
