use thiserror::Error;
use xacml_model::ModelError;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid enum name {name:?}: {source}")]
    InvalidEnumName {
        name: String,
        #[source]
        source: ModelError,
    },

    #[error("symbol {symbol} (from {uri}) clashes with a generated item")]
    ReservedVariant { symbol: String, uri: String },

    #[error("failed to format generated code")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
