//! Property tests for symbol normalization.

use proptest::prelude::*;
use xacml_normalize::to_symbol;

fn is_valid_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_alphanumeric())
}

proptest! {
    #[test]
    fn any_extracted_token_is_valid_or_rejected(token in "[A-Za-z0-9_-]{1,40}") {
        if let Ok(symbol) = to_symbol(&token) {
            prop_assert!(is_valid_symbol(symbol.as_str()), "{token} -> {symbol}");
        }
    }

    #[test]
    fn letter_led_tokens_always_normalize(
        token in "[a-z][a-zA-Z0-9]{0,8}(-[a-zA-Z][a-zA-Z0-9]{0,8}){0,4}"
    ) {
        prop_assume!(token != "self");
        let symbol = to_symbol(&token).unwrap();
        prop_assert_eq!(symbol.as_str().len(), token.replace('-', "").len());
        prop_assert!(symbol.as_str().eq_ignore_ascii_case(&token.replace('-', "")));
    }

    #[test]
    fn normalization_is_idempotent(token in "[A-Za-z0-9_-]{1,40}") {
        if let Ok(symbol) = to_symbol(&token) {
            prop_assert_eq!(to_symbol(symbol.as_str()).unwrap(), symbol);
        }
    }
}
