//! Catalog assembly: normalization, URI de-duplication and collision policy.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};
use xacml_model::{
    Catalog, CollisionPolicy, IdentifierRecord, ModelError, RawIdentifier, Symbol,
};

use crate::error::{NormalizeError, Result};
use crate::symbol::to_symbol;

fn normalize(raw: &RawIdentifier) -> Result<Symbol> {
    to_symbol(&raw.token).map_err(|source| match source {
        ModelError::EmptySymbol => NormalizeError::EmptySymbol {
            row: raw.row,
            uri: raw.uri.clone(),
            token: raw.token.clone(),
        },
        source => NormalizeError::InvalidSymbol {
            row: raw.row,
            uri: raw.uri.clone(),
            token: raw.token.clone(),
            source,
        },
    })
}

/// Smallest `symbol{n}` (n >= 2) that is neither taken nor the natural
/// symbol of any identifier in the document.
fn free_suffix(
    symbol: &Symbol,
    taken: &HashMap<Symbol, usize>,
    natural: &HashSet<Symbol>,
) -> Symbol {
    let mut n = 2;
    loop {
        let candidate = symbol.with_suffix(n);
        if !taken.contains_key(&candidate) && !natural.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Build the catalog from raw identifiers in document order.
///
/// A URI seen before is dropped (first occurrence wins). Two different URIs
/// with the same symbol are handled according to `policy`.
pub fn build_catalog(raws: Vec<RawIdentifier>, policy: CollisionPolicy) -> Result<Catalog> {
    let total = raws.len();
    let mut seen_uris: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut normalized: Vec<(RawIdentifier, Symbol)> = Vec::with_capacity(total);
    for raw in raws {
        if let Some(first_row) = seen_uris.get(&raw.uri) {
            warn!(
                uri = %raw.uri,
                first_row,
                row = raw.row,
                "duplicate identifier, keeping first occurrence"
            );
            continue;
        }
        seen_uris.insert(raw.uri.clone(), raw.row);
        let symbol = normalize(&raw)?;
        normalized.push((raw, symbol));
    }
    let natural: HashSet<Symbol> = normalized.iter().map(|(_, symbol)| symbol.clone()).collect();

    let mut records: Vec<IdentifierRecord> = Vec::with_capacity(normalized.len());
    let mut taken: HashMap<Symbol, usize> = HashMap::with_capacity(normalized.len());
    for (raw, symbol) in normalized {
        let symbol = match taken.get(&symbol) {
            None => symbol,
            Some(&index) => {
                let first = &records[index];
                match policy {
                    CollisionPolicy::Fail => {
                        return Err(NormalizeError::SymbolCollision {
                            symbol: symbol.to_string(),
                            first_uri: first.uri.clone(),
                            first_row: first.row,
                            uri: raw.uri,
                            row: raw.row,
                        });
                    }
                    CollisionPolicy::KeepFirst => {
                        warn!(
                            symbol = %symbol,
                            kept = %first.uri,
                            dropped = %raw.uri,
                            row = raw.row,
                            "symbol collision, dropping later identifier"
                        );
                        continue;
                    }
                    CollisionPolicy::Suffix => {
                        let renamed = free_suffix(&symbol, &taken, &natural);
                        warn!(
                            symbol = %symbol,
                            renamed = %renamed,
                            uri = %raw.uri,
                            row = raw.row,
                            "symbol collision, adding numeric suffix"
                        );
                        renamed
                    }
                }
            }
        };

        debug!(row = raw.row, token = %raw.token, symbol = %symbol, "normalized identifier");
        taken.insert(symbol.clone(), records.len());
        records.push(IdentifierRecord::new(raw, symbol));
    }

    let catalog = Catalog::from_records(records)?;
    info!(
        identifiers = total,
        records = catalog.len(),
        "built function catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(row: usize, uri: &str) -> RawIdentifier {
        let token = uri.rsplit("function:").next().unwrap().to_string();
        RawIdentifier {
            row,
            uri: uri.to_string(),
            token,
        }
    }

    fn symbols(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|record| record.symbol.as_str()).collect()
    }

    #[test]
    fn builds_in_document_order() {
        let catalog = build_catalog(
            vec![
                raw(2, "urn:oasis:names:tc:xacml:1.0:function:string-equal"),
                raw(3, "urn:oasis:names:tc:xacml:1.0:function:integer-add"),
            ],
            CollisionPolicy::Fail,
        )
        .unwrap();
        assert_eq!(symbols(&catalog), vec!["StringEqual", "IntegerAdd"]);
    }

    #[test]
    fn repeated_uri_keeps_first() {
        let catalog = build_catalog(
            vec![
                raw(2, "urn:x:function:string-equal"),
                raw(9, "urn:x:function:string-equal"),
            ],
            CollisionPolicy::Fail,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].row, 2);
    }

    #[test]
    fn collision_fails_by_default() {
        let err = build_catalog(
            vec![
                raw(2, "urn:x:1.0:function:foo-bar"),
                raw(5, "urn:x:3.0:function:Foo-Bar"),
            ],
            CollisionPolicy::Fail,
        )
        .unwrap_err();
        match err {
            NormalizeError::SymbolCollision {
                symbol,
                first_uri,
                first_row,
                uri,
                row,
            } => {
                assert_eq!(symbol, "FooBar");
                assert_eq!(first_uri, "urn:x:1.0:function:foo-bar");
                assert_eq!(first_row, 2);
                assert_eq!(uri, "urn:x:3.0:function:Foo-Bar");
                assert_eq!(row, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn collision_keep_first_drops_later() {
        let catalog = build_catalog(
            vec![
                raw(2, "urn:x:1.0:function:foo-bar"),
                raw(5, "urn:x:3.0:function:foo_bar"),
                raw(6, "urn:x:3.0:function:baz"),
            ],
            CollisionPolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(symbols(&catalog), vec!["FooBar", "Baz"]);
        assert_eq!(catalog.records()[0].uri, "urn:x:1.0:function:foo-bar");
    }

    #[test]
    fn collision_suffix_picks_free_name() {
        let catalog = build_catalog(
            vec![
                raw(1, "urn:x:1.0:function:node-count"),
                raw(2, "urn:x:2.0:function:node-count2"),
                raw(3, "urn:x:3.0:function:node-count"),
                raw(4, "urn:x:4.0:function:node_count"),
            ],
            CollisionPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(
            symbols(&catalog),
            vec!["NodeCount", "NodeCount2", "NodeCount3", "NodeCount4"]
        );
    }

    #[test]
    fn collision_suffix_skips_names_used_later() {
        let catalog = build_catalog(
            vec![
                raw(1, "urn:x:1.0:function:node-count"),
                raw(2, "urn:x:3.0:function:node_count"),
                raw(3, "urn:x:3.0:function:node-count2"),
            ],
            CollisionPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(symbols(&catalog), vec!["NodeCount", "NodeCount3", "NodeCount2"]);
        assert_eq!(catalog.records()[2].uri, "urn:x:3.0:function:node-count2");
    }

    #[test]
    fn collision_policy_is_deterministic() {
        let input = vec![
            raw(1, "urn:x:1.0:function:foo-bar"),
            raw(2, "urn:x:3.0:function:foo_bar"),
        ];
        let first = build_catalog(input.clone(), CollisionPolicy::Suffix).unwrap();
        let second = build_catalog(input, CollisionPolicy::Suffix).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_token_names_row_and_uri() {
        let err = build_catalog(vec![raw(4, "urn:x:function:--")], CollisionPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, NormalizeError::EmptySymbol { row: 4, .. }));
        assert!(err.to_string().contains("urn:x:function:--"));

        let err = build_catalog(vec![raw(7, "urn:x:function:3-way")], CollisionPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidSymbol { row: 7, .. }));
    }

    #[test]
    fn empty_input_builds_empty_catalog() {
        let catalog = build_catalog(Vec::new(), CollisionPolicy::Fail).unwrap();
        assert!(catalog.is_empty());
    }
}
