use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("symbol is empty")]
    EmptySymbol,
    #[error("invalid symbol {symbol:?}: {reason}")]
    InvalidSymbol { symbol: String, reason: &'static str },
    #[error("duplicate uri {uri} (rows {first_row} and {row})")]
    DuplicateUri {
        uri: String,
        first_row: usize,
        row: usize,
    },
    #[error("duplicate symbol {symbol} for {first_uri} (row {first_row}) and {uri} (row {row})")]
    DuplicateSymbol {
        symbol: String,
        first_uri: String,
        first_row: usize,
        uri: String,
        row: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
