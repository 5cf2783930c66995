//! Authenticated user identity with its granted permissions.

use permgate_core::{HasPermissions, PermissionSet};

/// An authenticated user and the permissions loaded for them.
///
/// Inserted into request extensions by whatever authenticates the request;
/// the gate middleware only reads it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Stable identifier of the user.
    pub subject: String,
    /// Grants loaded for this request.
    pub permissions: PermissionSet,
}

impl AuthenticatedUser {
    /// Create a user with the given grants.
    pub fn new(subject: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            subject: subject.into(),
            permissions,
        }
    }
}

impl HasPermissions for AuthenticatedUser {
    fn has_permission(&self, name: &str) -> bool {
        self.permissions.has_permission(name)
    }
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}

/// Extract the user's subject from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no authenticated user is present.
pub fn subject_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .map(|u| u.subject.as_str())
        .unwrap_or("anonymous")
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_core::Permission;

    fn alice() -> AuthenticatedUser {
        AuthenticatedUser::new(
            "user-42",
            PermissionSet::from_records([Permission::new(42, "use-app")]).unwrap(),
        )
    }

    fn parts_with_user() -> http::request::Parts {
        let (mut parts, _body) = http::Request::new(()).into_parts();
        parts.extensions.insert(alice());
        parts
    }

    fn parts_without_user() -> http::request::Parts {
        let (parts, _body) = http::Request::new(()).into_parts();
        parts
    }

    #[test]
    fn test_user_from_parts_present() {
        let parts = parts_with_user();
        let user = user_from_parts(&parts).unwrap();
        assert_eq!(user.subject, "user-42");
        assert!(user.has_permission("use-app"));
    }

    #[test]
    fn test_user_from_parts_absent() {
        let parts = parts_without_user();
        assert!(user_from_parts(&parts).is_none());
    }

    #[test]
    fn test_subject_from_parts() {
        assert_eq!(subject_from_parts(&parts_with_user()), "user-42");
        assert_eq!(subject_from_parts(&parts_without_user()), "anonymous");
    }
}
