//! Token to symbol conversion.

use xacml_model::{ModelError, Symbol};

/// Characters that separate words inside a token.
const SEPARATORS: [char; 2] = ['-', '_'];

/// Convert a `function:` token into a PascalCase variant name.
///
/// Segments are split on `-` and `_`, empty segments are skipped, the first
/// character of each segment is uppercased and the rest is kept as written,
/// so `dateTime-add-dayTimeDuration` becomes `DateTimeAddDayTimeDuration`.
pub fn to_symbol(token: &str) -> Result<Symbol, ModelError> {
    let mut name = String::with_capacity(token.len());
    for segment in token.split(SEPARATORS).filter(|segment| !segment.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    Symbol::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(token: &str) -> String {
        to_symbol(token).unwrap().to_string()
    }

    #[test]
    fn capitalizes_each_segment() {
        assert_eq!(symbol("xacml-integer-equal"), "XacmlIntegerEqual");
        assert_eq!(symbol("string-equal"), "StringEqual");
        assert_eq!(symbol("integer-one-and-only"), "IntegerOneAndOnly");
    }

    #[test]
    fn keeps_inner_case() {
        assert_eq!(
            symbol("dateTime-add-dayTimeDuration"),
            "DateTimeAddDayTimeDuration"
        );
        assert_eq!(symbol("x500Name-match"), "X500NameMatch");
        assert_eq!(symbol("rfc822Name-match"), "Rfc822NameMatch");
    }

    #[test]
    fn treats_underscore_as_separator() {
        assert_eq!(symbol("any_of_all"), "AnyOfAll");
    }

    #[test]
    fn skips_empty_segments() {
        assert_eq!(symbol("-leading"), "Leading");
        assert_eq!(symbol("trailing-"), "Trailing");
        assert_eq!(symbol("double--hyphen"), "DoubleHyphen");
    }

    #[test]
    fn digit_after_separator_is_kept() {
        assert_eq!(symbol("ipAddress-v6"), "IpAddressV6");
        assert_eq!(symbol("string-from-2"), "StringFrom2");
    }

    #[test]
    fn empty_after_stripping_fails() {
        assert_eq!(to_symbol(""), Err(ModelError::EmptySymbol));
        assert_eq!(to_symbol("--"), Err(ModelError::EmptySymbol));
        assert_eq!(to_symbol("_-_"), Err(ModelError::EmptySymbol));
    }

    #[test]
    fn leading_digit_fails() {
        assert!(matches!(
            to_symbol("1st-order"),
            Err(ModelError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn reserved_word_fails() {
        assert!(to_symbol("self").is_err());
    }
}
