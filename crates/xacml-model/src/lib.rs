pub mod catalog;
pub mod error;
pub mod options;
pub mod symbol;

pub use catalog::{Catalog, IdentifierRecord, RawIdentifier};
pub use error::{ModelError, Result};
pub use options::{CollisionPolicy, GenerateOptions};
pub use symbol::Symbol;

/// Marker preceding the function token in every identifier.
pub const FUNCTION_MARKER: &str = "function:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = GenerateOptions::default();
        assert_eq!(options.enum_name, "XacmlFunction");
        assert_eq!(options.collision, CollisionPolicy::Fail);
        assert!(!options.serde);
        assert!(!options.allow_empty);
    }

    #[test]
    fn options_builder() {
        let options = GenerateOptions::new()
            .with_enum_name("FunctionId")
            .with_collision(CollisionPolicy::Suffix)
            .with_serde(true)
            .with_allow_empty(true);
        assert_eq!(options.enum_name, "FunctionId");
        assert_eq!(options.collision, CollisionPolicy::Suffix);
        assert!(options.serde && options.allow_empty);
    }
}
