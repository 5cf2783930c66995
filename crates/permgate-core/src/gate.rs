//! An explicit authorization gate.
//!
//! A host application registers its own rules with [`Gate::before`]; the
//! [`PermissionChecker`] always runs last as the after-hook. The gate is a
//! plain value: build it at startup, share it behind an `Arc`.
//!
//! ```rust
//! use permgate_core::{Gate, Permission, PermissionChecker, PermissionSet, Vocabulary};
//!
//! let vocabulary = Vocabulary::new(["edit-post", "delete-post"]).unwrap();
//! let gate: Gate<PermissionSet> = Gate::new(PermissionChecker::new(vocabulary));
//!
//! let user = PermissionSet::from_records([Permission::new(1, "delete-post")]).unwrap();
//! assert!(gate.allows(&user, "edit-post|delete-post").unwrap());
//! assert!(!gate.allows(&user, "edit-post").unwrap());
//! ```

use std::fmt;

use crate::checker::PermissionChecker;
use crate::error::{Error, Result};
use crate::permission::HasPermissions;

/// Runs host rules, then the permission checker, then default-deny.
pub struct Gate<U: ?Sized> {
    checker: PermissionChecker,
    rules: Vec<Box<dyn Fn(&U, &str) -> Option<bool> + Send + Sync>>,
}

impl<U> Gate<U>
where
    U: HasPermissions + ?Sized,
{
    /// A gate with no host rules.
    pub fn new(checker: PermissionChecker) -> Self {
        Self {
            checker,
            rules: Vec::new(),
        }
    }

    /// Register a host rule.
    ///
    /// Rules run in registration order; the first one returning `Some`
    /// decides the prior result and the remaining rules are skipped.
    pub fn before<F>(mut self, rule: F) -> Self
    where
        F: Fn(&U, &str) -> Option<bool> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// The checker used as the after-hook.
    pub fn checker(&self) -> &PermissionChecker {
        &self.checker
    }

    /// Raw gate result: `Some(true)`, `Some(false)` or `None` (no opinion).
    ///
    /// The checker's output only fills in a missing result; an explicit
    /// decision from a host rule is never replaced.
    pub fn inspect(&self, user: &U, ability: &str) -> Result<Option<bool>> {
        let prior = self.rules.iter().find_map(|rule| rule(user, ability));
        let hook = self.checker.check(user, ability, prior)?;
        Ok(prior.or(hook.as_option()))
    }

    /// Whether `ability` is allowed. No opinion counts as denied.
    pub fn allows(&self, user: &U, ability: &str) -> Result<bool> {
        Ok(self.inspect(user, ability)?.unwrap_or(false))
    }

    /// Negation of [`Gate::allows`].
    pub fn denies(&self, user: &U, ability: &str) -> Result<bool> {
        Ok(!self.allows(user, ability)?)
    }

    /// Whether any of several expressions is allowed.
    pub fn any(&self, user: &U, abilities: &[&str]) -> Result<bool> {
        for ability in abilities {
            if self.allows(user, ability)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Succeed when allowed, otherwise [`Error::Forbidden`].
    pub fn authorize(&self, user: &U, ability: &str) -> Result<()> {
        if self.allows(user, ability)? {
            Ok(())
        } else {
            Err(Error::Forbidden {
                ability: ability.to_string(),
            })
        }
    }
}

impl<U: ?Sized> fmt::Debug for Gate<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("checker", &self.checker)
            .field("rules", &self.rules.len())
            .finish()
    }
}
