//! Code generation for XACML function catalogs.
//!
//! [`EnumModel`] is built from a [`Catalog`] and holds both the variant list
//! and the URI lookup table; [`render_rust`] turns it into source text.

#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod model;
pub mod rust;

use tracing::debug;
use xacml_model::Catalog;

pub use crate::error::{CodegenError, Result};
pub use crate::hash::sha256_hex;
pub use crate::model::{CodegenOptions, EnumModel, LookupEntry, Variant};
pub use crate::rust::{GENERATOR, render_declaration, render_lookup, render_rust};

/// Build the model for `catalog` and render it as Rust source.
pub fn generate(catalog: &Catalog, options: &CodegenOptions) -> Result<String> {
    let model = EnumModel::from_catalog(catalog, options)?;
    let code = render_rust(&model)?;
    debug!(
        variants = model.variants.len(),
        bytes = code.len(),
        "rendered enum"
    );
    Ok(code)
}
