//! Identifier extraction from XACML function tables.
//!
//! Extraction runs in two steps: [`scan_rows`] turns markup into rows of
//! cell text, then [`extract_identifier`] matches the first cell of each row
//! against `function:<token>`. Rows that fail either step are skipped.

#![deny(unsafe_code)]

pub mod error;
pub mod extract;
pub mod scan;

use std::path::Path;

use tracing::{info, warn};
use xacml_model::RawIdentifier;

pub use crate::error::{IngestError, Result};
pub use crate::extract::{extract_identifier, match_function_token};
pub use crate::scan::{TableRow, TableScan, scan_rows};

/// Read the whole input document.
///
/// Invalid UTF-8 is replaced rather than rejected; the table text that
/// matters is ASCII.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(error) => {
            warn!(path = %path.display(), "document is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(error.as_bytes()).into_owned())
        }
    }
}

/// Identifiers found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Matching rows in document order.
    pub identifiers: Vec<RawIdentifier>,
    /// Byte offset where scanning stopped early, if it did.
    pub truncated_at: Option<u64>,
}

impl ParsedTable {
    pub fn is_complete(&self) -> bool {
        self.truncated_at.is_none()
    }
}

/// Identifiers of all matching rows, in document order.
pub fn parse_identifiers(markup: &str) -> ParsedTable {
    let scan = scan_rows(markup);
    let identifiers: Vec<RawIdentifier> = scan.rows.iter().filter_map(extract_identifier).collect();
    info!(
        rows = scan.rows.len(),
        identifiers = identifiers.len(),
        skipped = scan.rows.len() - identifiers.len(),
        "parsed function table"
    );
    ParsedTable {
        identifiers,
        truncated_at: scan.truncated_at,
    }
}
