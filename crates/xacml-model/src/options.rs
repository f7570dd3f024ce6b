//! Configuration options for catalog generation.

use serde::{Deserialize, Serialize};

/// What to do when two different URIs normalize to the same symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Abort the run and report both identifiers.
    #[default]
    Fail,
    /// Give later identifiers the smallest free numeric suffix (`Foo2`, `Foo3`, ...).
    ///
    /// A suffixed name never takes the natural name of another identifier in
    /// the same document, so `node-count2` keeps `NodeCount2` even when it
    /// comes after two colliding `node-count` spellings.
    Suffix,
    /// Keep the first identifier and drop later ones with a warning.
    KeepFirst,
}

/// Options controlling a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Name of the generated enum.
    pub enum_name: String,

    /// Symbol collision handling.
    pub collision: CollisionPolicy,

    /// Emit `serde` impls that (de)serialize through the URI.
    ///
    /// The consuming crate must depend on `serde` when this is set.
    pub serde: bool,

    /// Accept a document with no matching rows.
    ///
    /// An empty enum is valid Rust but is almost always the result of feeding
    /// the wrong document, so it is rejected unless asked for.
    pub allow_empty: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            enum_name: "XacmlFunction".to_string(),
            collision: CollisionPolicy::default(),
            serde: false,
            allow_empty: false,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enum_name(mut self, name: impl Into<String>) -> Self {
        self.enum_name = name.into();
        self
    }

    pub fn with_collision(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn with_serde(mut self, enable: bool) -> Self {
        self.serde = enable;
        self
    }

    pub fn with_allow_empty(mut self, enable: bool) -> Self {
        self.allow_empty = enable;
        self
    }
}
