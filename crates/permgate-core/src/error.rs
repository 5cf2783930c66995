//! Error types for permgate-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for permgate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in permgate-core
///
/// A user simply lacking a permission is never an error: that outcome is
/// [`Verdict::Abstain`](crate::Verdict::Abstain). Everything here is either a
/// programming/deployment mistake or an explicit gate refusal.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An ability expression names a permission outside the configured vocabulary.
    #[error("the specified ability '{name}' is not a defined permission")]
    UndefinedPermission {
        /// The offending (trimmed) name
        name: String,
    },

    /// An ability expression contained no permission names at all.
    #[error("ability expression is empty")]
    EmptyAbility,

    /// A configured permission name could never be matched by an ability expression.
    #[error("invalid permission name '{name}': {reason}")]
    InvalidPermissionName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The same permission name was granted twice to one holder.
    #[error("duplicate permission '{name}' for owner {owner_id}")]
    DuplicatePermission {
        /// Owner of the duplicated grant
        owner_id: u64,
        /// The duplicated name
        name: String,
    },

    /// The gate refused an ability.
    #[error("this action is unauthorized: {ability}")]
    Forbidden {
        /// The ability expression that was refused
        ability: String,
    },

    /// Configuration could not be resolved, read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error together with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an undefined-permission error for `name`.
    pub fn undefined<S: Into<String>>(name: S) -> Self {
        Error::UndefinedPermission { name: name.into() }
    }

    /// Returns whether this error is a configuration mistake.
    ///
    /// Configuration mistakes must abort the current request loudly rather
    /// than be reported as an access denial.
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::UndefinedPermission { .. }
            | Error::EmptyAbility
            | Error::InvalidPermissionName { .. }
            | Error::Config { .. } => true,
            Error::DuplicatePermission { .. }
            | Error::Forbidden { .. }
            | Error::Io { .. }
            | Error::Serialization(_) => false,
        }
    }
}
