use thiserror::Error;
use xacml_model::ModelError;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("token {token:?} in row {row} ({uri}) normalizes to an empty symbol")]
    EmptySymbol { row: usize, uri: String, token: String },

    #[error("token {token:?} in row {row} ({uri}) does not form a valid symbol: {source}")]
    InvalidSymbol {
        row: usize,
        uri: String,
        token: String,
        #[source]
        source: ModelError,
    },

    #[error(
        "symbol {symbol} collides: {first_uri} (row {first_row}) and {uri} (row {row})"
    )]
    SymbolCollision {
        symbol: String,
        first_uri: String,
        first_row: usize,
        uri: String,
        row: usize,
    },

    #[error(transparent)]
    Catalog(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
