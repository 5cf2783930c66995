//! HTTP authorization for permgate.
//!
//! Provides:
//! - [`AuthenticatedUser`] — Identity plus the permissions loaded for it
//! - [`GateLayer`] / [`GateService`] — Tower middleware requiring an ability expression
//! - [`GateError`] — Why a request was refused, with its HTTP status
//!
//! Authentication itself happens upstream: something must insert an
//! [`AuthenticatedUser`] into the request extensions before the gate runs.
//! Missing users get 401, users without a matching permission get 403, and a
//! guard naming an undefined permission answers 500.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod middleware;
mod user;

pub use error::GateError;
pub use middleware::{GateLayer, GateService};
pub use user::{AuthenticatedUser, subject_from_parts, user_from_parts};
