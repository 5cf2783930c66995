//! Error types for permgate-client

use thiserror::Error;

/// Result type alias for permgate-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in permgate-client
///
/// Only snapshot encoding/decoding can fail; lookups never do.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Snapshot JSON could not be produced or read
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
