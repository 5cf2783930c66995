//! Ability expressions: `|`-joined permission names, any one of which suffices.

use std::fmt;

use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;

/// Separator between alternative permission names.
pub const SEPARATOR: char = '|';

/// A parsed ability expression.
///
/// Names keep their order from the expression and are trimmed. Parsing alone
/// does not consult the vocabulary; see [`ParsedAbility::parse_defined`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAbility {
    names: Vec<String>,
}

impl ParsedAbility {
    /// Split `expression` on `|` and trim each token.
    ///
    /// An expression with nothing but whitespace is rejected. Empty tokens
    /// between separators (`"a||b"`) are kept as `""` so that vocabulary
    /// validation reports them.
    pub fn parse(expression: &str) -> Result<Self> {
        if expression.trim().is_empty() {
            return Err(Error::EmptyAbility);
        }
        let names = expression
            .split(SEPARATOR)
            .map(|token| token.trim().to_string())
            .collect();
        Ok(Self { names })
    }

    /// Parse and require every name to be defined in `vocabulary`.
    pub fn parse_defined(expression: &str, vocabulary: &Vocabulary) -> Result<Self> {
        let parsed = Self::parse(expression)?;
        if let Some(name) = parsed.names.iter().find(|n| !vocabulary.contains(n.as_str())) {
            return Err(Error::undefined(name.as_str()));
        }
        Ok(parsed)
    }

    /// The parsed names, in expression order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate the parsed names, in expression order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for ParsedAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in &self.names {
            if !first {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["edit-post", "delete-post", "use-app"]).unwrap()
    }

    #[test]
    fn test_parse_single() {
        let parsed = ParsedAbility::parse("use-app").unwrap();
        assert_eq!(parsed.names(), ["use-app"]);
    }

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let parsed = ParsedAbility::parse(" delete-post | edit-post ").unwrap();
        assert_eq!(parsed.iter().collect::<Vec<_>>(), vec!["delete-post", "edit-post"]);
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(ParsedAbility::parse(""), Err(Error::EmptyAbility)));
        assert!(matches!(ParsedAbility::parse("  \t"), Err(Error::EmptyAbility)));
    }

    #[test]
    fn test_parse_keeps_empty_tokens() {
        let parsed = ParsedAbility::parse("edit-post||use-app").unwrap();
        assert_eq!(parsed.names(), ["edit-post", "", "use-app"]);
    }

    #[test]
    fn test_parse_defined_reports_first_undefined() {
        let err = ParsedAbility::parse_defined("edit-post|publish|archive", &vocab()).unwrap_err();
        match err {
            Error::UndefinedPermission { name } => assert_eq!(name, "publish"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_defined_rejects_empty_token() {
        let err = ParsedAbility::parse_defined("edit-post|", &vocab()).unwrap_err();
        assert!(matches!(err, Error::UndefinedPermission { ref name } if name.is_empty()));
    }

    #[test]
    fn test_display_is_normalized() {
        let parsed = ParsedAbility::parse(" edit-post |delete-post").unwrap();
        assert_eq!(parsed.to_string(), "edit-post|delete-post");
    }
}
