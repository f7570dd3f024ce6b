// @generated by xacml-funcgen. Do not edit by hand.

use std::fmt;
use std::str::FromStr;

/// XACML function identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XacmlFunction {
    /// `urn:oasis:names:tc:xacml:1.0:function:string-equal`
    StringEqual,
    /// `urn:oasis:names:tc:xacml:1.0:function:integer-add`
    IntegerAdd,
    /// `urn:oasis:names:tc:xacml:3.0:function:dateTime-add-dayTimeDuration`
    DateTimeAddDayTimeDuration,
}

impl XacmlFunction {
    /// Every variant, in table order.
    pub const ALL: &'static [Self] = &[
        Self::StringEqual,
        Self::IntegerAdd,
        Self::DateTimeAddDayTimeDuration,
    ];

    /// The identifier URI of this function.
    pub fn as_uri(&self) -> &'static str {
        match self {
            Self::StringEqual => "urn:oasis:names:tc:xacml:1.0:function:string-equal",
            Self::IntegerAdd => "urn:oasis:names:tc:xacml:1.0:function:integer-add",
            Self::DateTimeAddDayTimeDuration => "urn:oasis:names:tc:xacml:3.0:function:dateTime-add-dayTimeDuration",
        }
    }
}

impl fmt::Display for XacmlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_uri())
    }
}

/// Error returned when parsing an identifier that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownXacmlFunction(pub String);

impl fmt::Display for UnknownXacmlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown function identifier: {}", self.0)
    }
}

impl std::error::Error for UnknownXacmlFunction {}

impl FromStr for XacmlFunction {
    type Err = UnknownXacmlFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urn:oasis:names:tc:xacml:1.0:function:string-equal" => Ok(Self::StringEqual),
            "urn:oasis:names:tc:xacml:1.0:function:integer-add" => Ok(Self::IntegerAdd),
            "urn:oasis:names:tc:xacml:3.0:function:dateTime-add-dayTimeDuration" => Ok(Self::DateTimeAddDayTimeDuration),
            _ => Err(UnknownXacmlFunction(s.to_string())),
        }
    }
}
