//! Validated variant names.

use serde::Serialize;
use std::fmt;

use crate::error::{ModelError, Result};

/// Names that are PascalCase but still reserved in Rust.
const RESERVED: &[&str] = &["Self"];

/// A variant name for the generated enum.
///
/// Always starts with an ASCII uppercase letter and contains only ASCII
/// letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Validate `value` as a variant name.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(ModelError::EmptySymbol);
        };
        if !first.is_ascii_uppercase() {
            return Err(ModelError::InvalidSymbol {
                symbol: value,
                reason: "must start with an ASCII uppercase letter",
            });
        }
        if !chars.all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ModelError::InvalidSymbol {
                symbol: value,
                reason: "must contain only ASCII letters and digits",
            });
        }
        if RESERVED.contains(&value.as_str()) {
            return Err(ModelError::InvalidSymbol {
                symbol: value,
                reason: "is a reserved word",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a numeric suffix, keeping the name valid.
    #[must_use]
    pub fn with_suffix(&self, suffix: usize) -> Self {
        Self(format!("{}{suffix}", self.0))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pascal_case() {
        let symbol = Symbol::new("IntegerEqual").unwrap();
        assert_eq!(symbol.as_str(), "IntegerEqual");
        assert!(Symbol::new("X500NameMatch").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Symbol::new(""), Err(ModelError::EmptySymbol));
    }

    #[test]
    fn rejects_leading_digit_and_lowercase() {
        assert!(matches!(
            Symbol::new("1Foo"),
            Err(ModelError::InvalidSymbol { .. })
        ));
        assert!(matches!(
            Symbol::new("foo"),
            Err(ModelError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn rejects_separators() {
        assert!(Symbol::new("Foo_Bar").is_err());
        assert!(Symbol::new("Foo-Bar").is_err());
    }

    #[test]
    fn rejects_reserved_self() {
        assert!(matches!(
            Symbol::new("Self"),
            Err(ModelError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn suffix_stays_valid() {
        let symbol = Symbol::new("StringEqual").unwrap().with_suffix(2);
        assert_eq!(symbol.as_str(), "StringEqual2");
        assert!(Symbol::new(symbol.as_str()).is_ok());
    }
}
