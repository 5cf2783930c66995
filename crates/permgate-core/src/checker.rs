//! The permission authorization check.
//!
//! [`PermissionChecker`] runs after any other authorization rules of a host.
//! It only ever adds an allow path: when it finds no matching grant it
//! abstains, leaving the final decision to the host's default policy.

use crate::ability::ParsedAbility;
use crate::error::Result;
use crate::permission::HasPermissions;
use crate::vocabulary::Vocabulary;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A matching grant was found, or an earlier rule already allowed.
    Allow,
    /// No opinion; the host's default policy applies.
    Abstain,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Allow`].
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The verdict as a gate result: `Some(true)` or `None`.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Allow => Some(true),
            Self::Abstain => None,
        }
    }
}

/// Decides whether a holder has any permission named in an ability expression.
#[derive(Debug, Clone, Default)]
pub struct PermissionChecker {
    vocabulary: Vocabulary,
}

impl PermissionChecker {
    /// Create a checker over the configured vocabulary.
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this checker validates against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Check `ability` for `user`, given the result of earlier rules.
    ///
    /// `prior` is `Some(true)`/`Some(false)` when an earlier rule decided and
    /// `None` when none did. Only `Some(true)` short-circuits; an earlier
    /// explicit deny is evaluated like "no rule ran".
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the expression is empty or names a
    /// permission outside the vocabulary. All names are validated before any
    /// grant is consulted.
    pub fn check<U>(&self, user: &U, ability: &str, prior: Option<bool>) -> Result<Verdict>
    where
        U: HasPermissions + ?Sized,
    {
        if prior == Some(true) {
            return Ok(Verdict::Allow);
        }

        let parsed = ParsedAbility::parse_defined(ability, &self.vocabulary)?;

        match parsed.iter().find(|name| user.has_permission(name)) {
            Some(name) => {
                log::debug!("Ability '{ability}' allowed by permission '{name}'");
                Ok(Verdict::Allow)
            }
            None => {
                log::trace!("Ability '{ability}' matched no granted permission");
                Ok(Verdict::Abstain)
            }
        }
    }

    /// Validate an expression against the vocabulary without checking a user.
    ///
    /// Useful at startup for route guards whose expressions are known ahead
    /// of time.
    pub fn validate(&self, ability: &str) -> Result<ParsedAbility> {
        ParsedAbility::parse_defined(ability, &self.vocabulary)
    }
}
