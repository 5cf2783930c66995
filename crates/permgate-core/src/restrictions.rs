//! Read-only restriction lookup over a materialized permission list.
//!
//! Meant for presentation code: lookups never fail. Anything unexpected
//! degrades to [`RestrictionStatus::NotPermitted`] with a log line.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::permission::{Permission, is_empty_payload};

/// Error text reported when a restriction payload cannot be decoded.
pub const DECODE_ERROR: &str = "ERROR DECODING RESTRICTIONS";

const RESERVED_FIELDS: [&str; 2] = ["status", "error"];

/// How much of a permission the user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestrictionStatus {
    /// The permission is not granted (or could not be read).
    #[serde(rename = "NOT PERMITTED")]
    NotPermitted,
    /// Granted without restrictions.
    #[serde(rename = "ALL PERMITTED")]
    AllPermitted,
    /// Granted with the restriction fields attached to the result.
    #[serde(rename = "SOME PERMITTED")]
    SomePermitted,
}

/// Result of a restriction lookup.
///
/// Serializes flat: `{"status": "SOME PERMITTED", "maxItems": 5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionResult {
    /// Lookup outcome.
    pub status: RestrictionStatus,

    /// Diagnostic when the payload could not be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Restriction fields, merged into the result.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RestrictionResult {
    /// A `NOT PERMITTED` result.
    pub fn not_permitted() -> Self {
        Self::with_status(RestrictionStatus::NotPermitted)
    }

    /// An `ALL PERMITTED` result.
    pub fn all_permitted() -> Self {
        Self::with_status(RestrictionStatus::AllPermitted)
    }

    /// A `SOME PERMITTED` result carrying `fields`.
    ///
    /// Restriction keys named `status` or `error` are dropped: the lookup's
    /// own status always wins so the result serializes with one of each.
    pub fn some_permitted(mut fields: Map<String, Value>) -> Self {
        for key in RESERVED_FIELDS {
            if let Some(value) = fields.remove(key) {
                log::warn!("Dropping reserved restriction field '{key}': {value}");
            }
        }
        Self {
            status: RestrictionStatus::SomePermitted,
            error: None,
            fields,
        }
    }

    /// A `NOT PERMITTED` result explaining a payload decode failure.
    pub fn decode_failure() -> Self {
        Self {
            error: Some(DECODE_ERROR.to_string()),
            ..Self::not_permitted()
        }
    }

    fn with_status(status: RestrictionStatus) -> Self {
        Self {
            status,
            error: None,
            fields: Map::new(),
        }
    }

    /// Whether the permission is held at all.
    pub fn is_permitted(&self) -> bool {
        self.status != RestrictionStatus::NotPermitted
    }

    /// Read one restriction field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Look up the restrictions attached to permission `name`.
///
/// `permissions` is `None` when the list was never loaded; that is reported
/// with a warning and treated as "not permitted".
pub fn lookup_restrictions(permissions: Option<&[Permission]>, name: &str) -> RestrictionResult {
    let Some(permissions) = permissions else {
        log::warn!("Permissions are not loaded; treating '{name}' as not permitted");
        return RestrictionResult::not_permitted();
    };

    let Some(permission) = permissions.iter().find(|p| p.name == name) else {
        return RestrictionResult::not_permitted();
    };

    let Some(payload) = permission.restrictions.as_ref() else {
        return RestrictionResult::all_permitted();
    };
    match decode_payload(payload) {
        Some(payload) if is_empty_payload(&payload) => RestrictionResult::all_permitted(),
        Some(payload) => RestrictionResult::some_permitted(merge_fields(payload)),
        None => {
            log::warn!("Restrictions for permission '{name}' are not valid JSON: {payload}");
            RestrictionResult::decode_failure()
        }
    }
}

/// Whether permission `name` is present in a possibly-unloaded list.
pub fn user_can(permissions: Option<&[Permission]>, name: &str) -> bool {
    match permissions {
        Some(permissions) => permissions.iter().any(|p| p.name == name),
        None => {
            log::warn!("Permissions are not loaded; treating '{name}' as not permitted");
            false
        }
    }
}

// Rows persisted as text are decoded here; `None` when that text is not JSON.
fn decode_payload(payload: &Value) -> Option<Value> {
    match payload {
        Value::String(raw) if !raw.is_empty() => serde_json::from_str(raw).ok(),
        other => Some(other.clone()),
    }
}

// Objects merge their keys, lists merge index-keyed, scalars add nothing.
fn merge_fields(payload: Value) -> Map<String, Value> {
    match payload {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grant(name: &str, restrictions: Value) -> Permission {
        Permission::new(1, name).with_restrictions(restrictions)
    }

    #[test]
    fn test_unloaded_is_not_permitted() {
        let r = lookup_restrictions(None, "use-app");
        assert_eq!(r.status, RestrictionStatus::NotPermitted);
        assert!(!r.is_permitted());
    }

    #[test]
    fn test_missing_is_not_permitted() {
        let r = lookup_restrictions(Some(&[] as &[Permission]), "use-app");
        assert_eq!(r, RestrictionResult::not_permitted());
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({"status": "NOT PERMITTED"}));
    }

    #[test]
    fn test_null_restrictions_all_permitted() {
        let perms = [grant("use-app", Value::Null)];
        let r = lookup_restrictions(Some(&perms[..]), "use-app");
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({"status": "ALL PERMITTED"}));
    }

    #[test]
    fn test_empty_object_all_permitted() {
        let perms = [grant("use-app", json!({}))];
        let r = lookup_restrictions(Some(&perms[..]), "use-app");
        assert_eq!(r.status, RestrictionStatus::AllPermitted);
    }

    #[test]
    fn test_object_some_permitted_merged() {
        let perms = [grant("use-app", json!({"maxItems": 5}))];
        let r = lookup_restrictions(Some(&perms[..]), "use-app");
        assert_eq!(r.status, RestrictionStatus::SomePermitted);
        assert_eq!(r.get("maxItems"), Some(&json!(5)));
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"status": "SOME PERMITTED", "maxItems": 5})
        );
    }

    #[test]
    fn test_json_text_payload_is_decoded() {
        let perms = [grant("edit-post", json!(r#"{"categories":["news"]}"#))];
        let r = lookup_restrictions(Some(&perms[..]), "edit-post");
        assert_eq!(r.status, RestrictionStatus::SomePermitted);
        assert_eq!(r.get("categories"), Some(&json!(["news"])));
    }

    #[test]
    fn test_undecodable_payload_reports_error() {
        let perms = [grant("edit-post", json!("{broken"))];
        let r = lookup_restrictions(Some(&perms[..]), "edit-post");
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"status": "NOT PERMITTED", "error": DECODE_ERROR})
        );
    }

    #[test]
    fn test_list_payload_merges_by_index() {
        let perms = [grant("edit-post", json!(["news", "sports"]))];
        let r = lookup_restrictions(Some(&perms[..]), "edit-post");
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"status": "SOME PERMITTED", "0": "news", "1": "sports"})
        );
    }

    #[test]
    fn test_scalar_payloads_some_permitted_without_fields() {
        for payload in [json!(5), json!(true), json!("\"news\"")] {
            let perms = [grant("edit-post", payload.clone())];
            let r = lookup_restrictions(Some(&perms[..]), "edit-post");
            assert_eq!(
                serde_json::to_value(&r).unwrap(),
                json!({"status": "SOME PERMITTED"}),
                "payload {payload}"
            );
        }
    }

    #[test]
    fn test_zero_payload_all_permitted() {
        for payload in [json!(0), json!(0.0), json!("0")] {
            let perms = [grant("edit-post", payload.clone())];
            let r = lookup_restrictions(Some(&perms[..]), "edit-post");
            assert_eq!(r.status, RestrictionStatus::AllPermitted, "payload {payload}");
        }
    }

    #[test]
    fn test_json_text_list_is_decoded() {
        let perms = [grant("edit-post", json!(r#"["news"]"#))];
        let r = lookup_restrictions(Some(&perms[..]), "edit-post");
        assert_eq!(r.status, RestrictionStatus::SomePermitted);
        assert_eq!(r.get("0"), Some(&json!("news")));
    }

    #[test]
    fn test_reserved_keys_do_not_override_status() {
        let perms = [grant("use-app", json!({"maxItems": 5, "status": "x", "error": "y"}))];
        let r = lookup_restrictions(Some(&perms[..]), "use-app");
        let text = serde_json::to_string(&r).unwrap();
        assert_eq!(text.matches("\"status\"").count(), 1);
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"status": "SOME PERMITTED", "maxItems": 5})
        );
        let back: RestrictionResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_result_deserializes_flat() {
        let r: RestrictionResult =
            serde_json::from_str(r#"{"status":"SOME PERMITTED","maxItems":5}"#).unwrap();
        assert_eq!(r.status, RestrictionStatus::SomePermitted);
        assert_eq!(r.get("maxItems"), Some(&json!(5)));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_user_can() {
        let perms = [grant("use-app", Value::Null)];
        assert!(user_can(Some(&perms[..]), "use-app"));
        assert!(!user_can(Some(&perms[..]), "edit-post"));
        assert!(!user_can(None, "use-app"));
    }
}
