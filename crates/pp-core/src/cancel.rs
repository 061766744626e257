use thiserror::Error;

/// Marker error for work abandoned because its batch was superseded.
///
/// Callers absorb it silently; it is never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;
