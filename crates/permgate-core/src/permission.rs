//! Granted permissions and the capability trait the checker reads.
//!
//! A [`Permission`] is one grant row: an owner, a name and an optional,
//! opaque restriction payload. A [`PermissionSet`] is a single user's
//! materialized grants, keyed by name. The checker never looks at concrete
//! user types; it only asks [`HasPermissions::has_permission`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Default permission name given to a new grant row.
pub const DEFAULT_PERMISSION: &str = "use-app";

// ============================================================================
// Permission
// ============================================================================

/// One granted permission.
///
/// Serializes with the persisted column names (`user_id`, `permission`,
/// `restrictions`), which is also the shape the client helpers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Identity of the owning user.
    #[serde(rename = "user_id", default)]
    pub owner_id: u64,

    /// Permission name, matched exactly and case-sensitively.
    #[serde(rename = "permission")]
    pub name: String,

    /// Application-defined restriction data. `None` means unrestricted.
    #[serde(default)]
    pub restrictions: Option<Value>,

    /// Row creation time, when loaded from a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Row update time, when loaded from a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Permission {
    /// Create an unrestricted grant.
    pub fn new(owner_id: u64, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            restrictions: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach restriction data.
    pub fn with_restrictions(mut self, restrictions: Value) -> Self {
        self.restrictions = match restrictions {
            Value::Null => None,
            other => Some(other),
        };
        self
    }

    /// Build a grant from a stored row whose restriction column holds raw JSON text.
    ///
    /// A malformed restriction column decodes to `None`; it never fails the row.
    pub fn from_row(
        owner_id: u64,
        name: impl Into<String>,
        raw_restrictions: Option<&str>,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        let name = name.into();
        let restrictions = decode_restrictions(&name, raw_restrictions);
        Self {
            owner_id,
            name,
            restrictions,
            created_at,
            updated_at,
        }
    }

    /// Whether this grant carries no restriction data worth applying.
    ///
    /// `null`, `false`, `""`, `{}` and `[]` all count as unrestricted.
    pub fn is_unrestricted(&self) -> bool {
        self.restrictions.as_ref().is_none_or(is_empty_payload)
    }
}

/// Decode a raw restriction column. Blank or malformed input yields `None`.
pub fn decode_restrictions(name: &str, raw: Option<&str>) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding undecodable restrictions for permission '{name}': {e}");
            None
        }
    }
}

pub(crate) fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

// ============================================================================
// PermissionSet
// ============================================================================

/// A user's materialized grants, unique by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionSet {
    by_name: BTreeMap<String, Permission>,
}

impl PermissionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from grant rows, rejecting a name granted twice.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Permission>,
    {
        let mut by_name = BTreeMap::new();
        for record in records {
            if by_name.contains_key(&record.name) {
                return Err(Error::DuplicatePermission {
                    owner_id: record.owner_id,
                    name: record.name,
                });
            }
            by_name.insert(record.name.clone(), record);
        }
        Ok(Self { by_name })
    }

    /// Look up a grant by exact name.
    pub fn get(&self, name: &str) -> Option<&Permission> {
        self.by_name.get(name)
    }

    /// Whether a grant with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Granted names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All grants in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.by_name.values()
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no permission is granted.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Grants as an owned list, e.g. for a client snapshot.
    pub fn to_vec(&self) -> Vec<Permission> {
        self.by_name.values().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_map::Values<'a, String, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_name.values()
    }
}

// ============================================================================
// HasPermissions
// ============================================================================

/// Anything that can answer "is this exact permission name granted?".
pub trait HasPermissions {
    /// Whether a grant named `name` (exact, case-sensitive) is held.
    fn has_permission(&self, name: &str) -> bool;
}

impl HasPermissions for PermissionSet {
    fn has_permission(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl HasPermissions for [Permission] {
    fn has_permission(&self, name: &str) -> bool {
        self.iter().any(|p| p.name == name)
    }
}

impl HasPermissions for Vec<Permission> {
    fn has_permission(&self, name: &str) -> bool {
        self.as_slice().has_permission(name)
    }
}

impl<S: BuildHasher> HasPermissions for HashSet<String, S> {
    fn has_permission(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl HasPermissions for BTreeSet<String> {
    fn has_permission(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V, S: BuildHasher> HasPermissions for HashMap<String, V, S> {
    fn has_permission(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V> HasPermissions for BTreeMap<String, V> {
    fn has_permission(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<T: HasPermissions + ?Sized> HasPermissions for &T {
    fn has_permission(&self, name: &str) -> bool {
        (**self).has_permission(name)
    }
}
