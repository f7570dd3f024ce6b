//! Identifier records and the ordered catalog built from them.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{ModelError, Result};
use crate::symbol::Symbol;

/// A `function:` identifier found in the source table, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawIdentifier {
    /// 1-based index of the table row in document order.
    pub row: usize,
    /// Full identifier text of the first cell.
    pub uri: String,
    /// Suffix after the `function:` marker.
    pub token: String,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierRecord {
    pub row: usize,
    pub uri: String,
    pub token: String,
    pub symbol: Symbol,
}

impl IdentifierRecord {
    pub fn new(raw: RawIdentifier, symbol: Symbol) -> Self {
        Self {
            row: raw.row,
            uri: raw.uri,
            token: raw.token,
            symbol,
        }
    }
}

/// Ordered set of identifier records, unique by both URI and symbol.
///
/// Order follows the source document and decides the order of generated
/// variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<IdentifierRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate URIs or symbols.
    pub fn from_records(records: Vec<IdentifierRecord>) -> Result<Self> {
        check_unique(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[IdentifierRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IdentifierRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its exact URI.
    pub fn get(&self, uri: &str) -> Option<&IdentifierRecord> {
        self.records.iter().find(|record| record.uri == uri)
    }
}

fn check_unique(records: &[IdentifierRecord]) -> Result<()> {
    let mut by_uri: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut by_symbol: HashMap<&Symbol, &IdentifierRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(first_row) = by_uri.insert(record.uri.as_str(), record.row) {
            return Err(ModelError::DuplicateUri {
                uri: record.uri.clone(),
                first_row,
                row: record.row,
            });
        }
        if let Some(first) = by_symbol.insert(&record.symbol, record) {
            return Err(ModelError::DuplicateSymbol {
                symbol: record.symbol.to_string(),
                first_uri: first.uri.clone(),
                first_row: first.row,
                uri: record.uri.clone(),
                row: record.row,
            });
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a IdentifierRecord;
    type IntoIter = std::slice::Iter<'a, IdentifierRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
