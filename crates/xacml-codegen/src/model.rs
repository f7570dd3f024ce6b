//! Structured form of the generated enum, independent of output syntax.

use xacml_model::{Catalog, GenerateOptions, Symbol};

use crate::error::{CodegenError, Result};

/// Variant names that would clash with associated items of the generated enum.
const RESERVED_VARIANTS: &[&str] = &["ALL"];

/// Options for building an [`EnumModel`].
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    pub enum_name: String,
    pub serde: bool,
    /// SHA-256 of the source document, recorded in the header.
    pub source_digest: Option<String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self::from(&GenerateOptions::default())
    }
}

impl From<&GenerateOptions> for CodegenOptions {
    fn from(options: &GenerateOptions) -> Self {
        Self {
            enum_name: options.enum_name.clone(),
            serde: options.serde,
            source_digest: None,
        }
    }
}

impl CodegenOptions {
    #[must_use]
    pub fn with_source_digest(mut self, digest: impl Into<String>) -> Self {
        self.source_digest = Some(digest.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: Symbol,
    pub uri: String,
}

/// One row of the reverse mapping: an exact URI and the variant it parses to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub uri: String,
    /// Index into [`EnumModel::variants`].
    pub variant: usize,
}

/// The generated type: ordered variants plus the URI lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumModel {
    pub name: Symbol,
    pub error_name: Symbol,
    pub variants: Vec<Variant>,
    pub lookup: Vec<LookupEntry>,
    pub serde: bool,
    pub source_digest: Option<String>,
}

impl EnumModel {
    /// Build the model from a catalog, keeping catalog order.
    pub fn from_catalog(catalog: &Catalog, options: &CodegenOptions) -> Result<Self> {
        let invalid_name = |source| CodegenError::InvalidEnumName {
            name: options.enum_name.clone(),
            source,
        };
        let name = Symbol::new(options.enum_name.as_str()).map_err(invalid_name)?;
        let error_name = Symbol::new(format!("Unknown{name}")).map_err(invalid_name)?;

        let mut variants = Vec::with_capacity(catalog.len());
        let mut lookup = Vec::with_capacity(catalog.len());
        for record in catalog {
            if RESERVED_VARIANTS.contains(&record.symbol.as_str()) {
                return Err(CodegenError::ReservedVariant {
                    symbol: record.symbol.to_string(),
                    uri: record.uri.clone(),
                });
            }
            lookup.push(LookupEntry {
                uri: record.uri.clone(),
                variant: variants.len(),
            });
            variants.push(Variant {
                name: record.symbol.clone(),
                uri: record.uri.clone(),
            });
        }

        Ok(Self {
            name,
            error_name,
            variants,
            lookup,
            serde: options.serde,
            source_digest: options.source_digest.clone(),
        })
    }

    /// Resolve a URI the way the generated `FromStr` impl does.
    pub fn resolve(&self, uri: &str) -> Option<&Variant> {
        self.lookup
            .iter()
            .find(|entry| entry.uri == uri)
            .and_then(|entry| self.variants.get(entry.variant))
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
