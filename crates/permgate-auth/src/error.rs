//! Gate-specific error types.

use http::StatusCode;

/// Reasons a guarded request does not reach its handler.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// No authenticated user was attached to the request.
    #[error("missing authenticated user")]
    Unauthenticated,

    /// The user holds none of the permissions in the ability expression.
    #[error("this action is unauthorized: {0}")]
    Forbidden(String),

    /// The guard itself is misconfigured (e.g. an undefined permission name).
    #[error("authorization misconfigured: {0}")]
    Misconfigured(#[source] permgate_core::Error),
}

impl GateError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            GateError::Unauthenticated => StatusCode::UNAUTHORIZED,
            GateError::Forbidden(_) => StatusCode::FORBIDDEN,
            GateError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error category reported in the response body.
    pub fn category(&self) -> &'static str {
        match self {
            GateError::Unauthenticated => "authentication",
            GateError::Forbidden(_) => "authorization",
            GateError::Misconfigured(_) => "configuration",
        }
    }

    /// Whether this error should result in a 4xx (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl From<permgate_core::Error> for GateError {
    fn from(err: permgate_core::Error) -> Self {
        match err {
            permgate_core::Error::Forbidden { ability } => GateError::Forbidden(ability),
            other => GateError::Misconfigured(other),
        }
    }
}
