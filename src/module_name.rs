//! Semantic wrapper for extension module names.
//!
//! A module name determines the load name of the built artifact, so it is
//! validated at construction rather than at build time: dot-separated ASCII
//! identifier segments, none empty.

use crate::error::{BuildError, Result};
use std::fmt;

/// A validated extension module name.
///
/// The name uniquely determines the output artifact's load name. Invalid
/// names are rejected at construction with [`BuildError::Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a validated module name.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Configuration`] if the name is empty or any
    /// dot-separated segment is not an ASCII identifier.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(BuildError::Configuration {
                reason: "extension name must not be empty".to_owned(),
            });
        }

        if !name.split('.').all(is_identifier) {
            return Err(BuildError::Configuration {
                reason: format!("extension name {name:?} is not a valid module name"),
            });
        }

        Ok(Self(name))
    }

    /// Get the module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("pykimuracore")]
    #[case::underscore("_native")]
    #[case::dotted("kimura.core")]
    #[case::digits("module2")]
    fn accepts_valid_names(#[case] name: &str) {
        let parsed = ModuleName::new(name).expect("name should be accepted");
        assert_eq!(parsed.as_str(), name);
    }

    #[rstest]
    #[case::empty("")]
    #[case::leading_digit("2core")]
    #[case::hyphen("py-core")]
    #[case::trailing_dot("core.")]
    #[case::empty_segment("a..b")]
    #[case::space("py core")]
    fn rejects_invalid_names(#[case] name: &str) {
        let err = ModuleName::new(name).expect_err("name should be rejected");
        assert!(matches!(err, BuildError::Configuration { .. }));
    }

    #[test]
    fn displays_as_plain_name() {
        let name = ModuleName::new("pykimuracore").expect("valid name");
        assert_eq!(name.to_string(), "pykimuracore");
    }
}
