//! Integration tests for permgate-core.
//!
//! Drives the public API the way a host application does: configuration in,
//! vocabulary and gate built once, then per-request checks and lookups.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use permgate_core::{
    Error, Gate, Permission, PermissionChecker, PermissionSet, PermgateConfig, RestrictionStatus,
    Verdict, lookup_restrictions,
};
use serde_json::json;

const CONFIG: &str = r#"
[auth]
defined_permissions = ["use-app", "edit-post", "delete-post", "manage-users"]
"#;

fn checker() -> PermissionChecker {
    let config = PermgateConfig::from_toml_str(CONFIG).unwrap();
    PermissionChecker::new(config.vocabulary().unwrap())
}

fn editor() -> PermissionSet {
    PermissionSet::from_records([
        Permission::from_row(7, "use-app", None, None, None),
        Permission::from_row(7, "edit-post", Some(r#"{"categories":["news"]}"#), None, None),
    ])
    .unwrap()
}

#[test]
fn test_checker_from_config() {
    let c = checker();
    let user = editor();

    assert_eq!(c.check(&user, "edit-post", Some(false)).unwrap(), Verdict::Allow);
    assert_eq!(c.check(&user, "manage-users", Some(false)).unwrap(), Verdict::Abstain);
    assert_eq!(c.check(&user, "delete-post|edit-post", None).unwrap(), Verdict::Allow);
    assert_eq!(c.check(&user, "manage-users", Some(true)).unwrap(), Verdict::Allow);
    assert_eq!(
        c.check(&user, " delete-post | edit-post ", None).unwrap(),
        c.check(&user, "delete-post|edit-post", None).unwrap()
    );
    assert!(matches!(
        c.check(&user, "not-configured-name", Some(false)),
        Err(Error::UndefinedPermission { .. })
    ));
}

#[test]
fn test_gate_shared_across_threads() {
    let gate: Arc<Gate<PermissionSet>> = Arc::new(
        Gate::<PermissionSet>::new(checker()).before(|user, ability| {
            (ability == "manage-users" && user.contains("use-app") && user.len() > 5)
                .then_some(true)
        }),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                let user = editor();
                (
                    gate.allows(&user, "edit-post").unwrap(),
                    gate.allows(&user, "manage-users").unwrap(),
                )
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), (true, false));
    }
}

#[test]
fn test_restriction_lookups() {
    let use_app = [Permission::new(1, "use-app")];
    assert_eq!(
        lookup_restrictions(Some(&use_app[..]), "use-app").status,
        RestrictionStatus::AllPermitted
    );

    let limited = [Permission::new(1, "use-app").with_restrictions(json!({"maxItems": 5}))];
    let result = lookup_restrictions(Some(&limited[..]), "use-app");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"status": "SOME PERMITTED", "maxItems": 5})
    );

    assert_eq!(
        lookup_restrictions(Some(&[] as &[Permission]), "use-app").status,
        RestrictionStatus::NotPermitted
    );

    let editor = editor().to_vec();
    let categories = lookup_restrictions(Some(editor.as_slice()), "edit-post");
    assert_eq!(categories.get("categories"), Some(&json!(["news"])));
}
