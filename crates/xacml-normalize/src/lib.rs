#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod symbol;

pub use crate::catalog::build_catalog;
pub use crate::error::{NormalizeError, Result};
pub use crate::symbol::to_symbol;
