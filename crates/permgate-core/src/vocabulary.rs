//! The closed set of permission names an ability expression may use.

use std::collections::BTreeSet;

use crate::ability::SEPARATOR;
use crate::error::{Error, Result};

/// Configured permission names.
///
/// Built once at startup and never mutated. Every name is a valid single
/// token of an ability expression: non-empty, no surrounding whitespace, and
/// free of the `|` separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting names that no expression could ever match.
    ///
    /// Repeated names are collapsed.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            validate_name(&name)?;
            if !set.insert(name.clone()) {
                log::debug!("Permission '{name}' is defined more than once");
            }
        }
        Ok(Self { names: set })
    }

    /// Whether `name` is a defined permission.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Defined names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of defined names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.trim() != name {
        "name has surrounding whitespace"
    } else if name.contains(SEPARATOR) {
        "name contains the '|' separator"
    } else {
        return Ok(());
    };
    Err(Error::InvalidPermissionName {
        name: name.to_string(),
        reason,
    })
}
