//! # permgate-client
//!
//! Client-side view of a user's permissions.
//!
//! The server embeds an [`AppGlobals`] snapshot in the page; presentation
//! code then asks [`user_can`] and [`user_restrictions`] without another
//! round trip. Lookups never fail: a missing snapshot, user or permission
//! list is logged and reported as "not permitted".

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod globals;

pub use error::{Error, Result};
pub use globals::{
    AppGlobals, ClientUser, check_user_permissions_exist, user_can, user_restrictions,
};
