//! # permgate-core
//!
//! Named user permissions and the ability check built on them.
//!
//! A user holds zero or more named [`Permission`]s, each optionally carrying
//! opaque restriction data. An ability expression such as
//! `"edit-post|delete-post"` is allowed when the user holds ANY of the names.
//! Names must come from a configured [`Vocabulary`]; naming anything else is
//! a configuration error, never a silent deny.
//!
//! # Modules
//!
//! - [`permission`]: grant records, [`PermissionSet`], [`HasPermissions`]
//! - [`vocabulary`]: the defined permission names
//! - [`ability`]: ability expression parsing
//! - [`checker`]: [`PermissionChecker`] and [`Verdict`]
//! - [`gate`]: [`Gate`], host rules + checker + default deny
//! - [`restrictions`]: read-only restriction lookup
//! - [`config`]: TOML configuration
//! - [`error`]: Error types and Result alias

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod ability;
pub mod checker;
pub mod config;
pub mod error;
pub mod gate;
pub mod permission;
pub mod restrictions;
pub mod vocabulary;

mod proptests;

pub use ability::{ParsedAbility, SEPARATOR};
pub use checker::{PermissionChecker, Verdict};
pub use config::PermgateConfig;
pub use error::{Error, Result};
pub use gate::Gate;
pub use permission::{DEFAULT_PERMISSION, HasPermissions, Permission, PermissionSet};
pub use restrictions::{RestrictionResult, RestrictionStatus, lookup_restrictions, user_can};
pub use vocabulary::Vocabulary;
