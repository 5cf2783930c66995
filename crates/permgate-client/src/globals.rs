//! The bootstrap object a page embeds, and lookups against it.
//!
//! The server renders [`AppGlobals`] into the page once; the client answers
//! permission questions from that snapshot without further requests. Every
//! lookup first runs [`check_user_permissions_exist`], so a page rendered
//! without the user or their permissions degrades to "not permitted" with a
//! diagnostic instead of failing.

use permgate_core::{Permission, PermissionSet, RestrictionResult};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Page bootstrap data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppGlobals {
    /// The signed-in user, if the page was rendered with one.
    #[serde(default)]
    pub user: Option<ClientUser>,
}

/// The user as seen by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientUser {
    /// Granted permissions; `None` when the relation was not loaded.
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

impl AppGlobals {
    /// Snapshot for a user with the given grants.
    pub fn for_user(permissions: &PermissionSet) -> Self {
        Self {
            user: Some(ClientUser {
                permissions: Some(permissions.to_vec()),
            }),
        }
    }

    /// Decode a snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the snapshot for embedding in a page.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The permission list, if the user and the list are both present.
    pub fn permissions(&self) -> Option<&[Permission]> {
        self.user.as_ref()?.permissions.as_deref()
    }
}

/// Whether the snapshot carries a user with loaded permissions.
///
/// Logs which piece is missing otherwise.
pub fn check_user_permissions_exist(globals: Option<&AppGlobals>) -> bool {
    let Some(globals) = globals else {
        log::warn!("App globals are missing. Ensure they are passed to the front-end.");
        return false;
    };
    let Some(user) = &globals.user else {
        log::warn!("User property missing from app globals. Ensure it is passed to the front-end.");
        return false;
    };
    if user.permissions.is_none() {
        log::warn!(
            "User permissions missing from app globals. Ensure the permissions are loaded \
             before passing the user to the front-end."
        );
        return false;
    }
    true
}

/// Whether the user holds permission `name`.
pub fn user_can(globals: Option<&AppGlobals>, name: &str) -> bool {
    if !check_user_permissions_exist(globals) {
        return false;
    }
    permgate_core::user_can(globals.and_then(AppGlobals::permissions), name)
}

/// Restrictions attached to permission `name`.
pub fn user_restrictions(globals: Option<&AppGlobals>, name: &str) -> RestrictionResult {
    if !check_user_permissions_exist(globals) {
        return RestrictionResult::not_permitted();
    }
    permgate_core::lookup_restrictions(globals.and_then(AppGlobals::permissions), name)
}
