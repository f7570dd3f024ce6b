//! Identifier matching on scanned rows.

use tracing::trace;
use xacml_model::{FUNCTION_MARKER, RawIdentifier};

use crate::scan::TableRow;

/// Minimum number of cells a row needs to be considered.
pub const MIN_CELLS: usize = 2;

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Return the token when `text` ends with `function:<token>`.
///
/// Only the last marker can match because `:` is not a token character.
pub fn match_function_token(text: &str) -> Option<&str> {
    let start = text.rfind(FUNCTION_MARKER)? + FUNCTION_MARKER.len();
    let token = &text[start..];
    if !token.is_empty() && token.chars().all(is_token_char) {
        Some(token)
    } else {
        None
    }
}

/// Extract the identifier of a single row, if it has one.
pub fn extract_identifier(row: &TableRow) -> Option<RawIdentifier> {
    if row.cells.len() < MIN_CELLS {
        trace!(row = row.index, cells = row.cells.len(), "skipping row: too few cells");
        return None;
    }
    let text = &row.cells[0];
    let Some(token) = match_function_token(text) else {
        trace!(row = row.index, text = %text, "skipping row: no function identifier");
        return None;
    };
    Some(RawIdentifier {
        row: row.index,
        uri: text.clone(),
        token: token.to_string(),
    })
}
