//! Rust source rendering of an [`EnumModel`].
//!
//! The output has two parts that are rendered from the same model: the
//! enum declaration (with `ALL` and `as_uri`) and the reverse lookup (the
//! `FromStr` impl and its error type). Optional `serde` impls go through
//! the same URI strings.

use std::fmt::Write;

use crate::error::Result;
use crate::model::EnumModel;

pub const GENERATOR: &str = "xacml-funcgen";

const INDENT: &str = "    ";

/// Doc comment text with control characters flattened to spaces.
fn doc_text(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

/// A Rust string literal for `value`.
fn literal(value: &str) -> String {
    format!("{value:?}")
}

fn write_header(out: &mut String, model: &EnumModel) -> Result<()> {
    writeln!(out, "// @generated by {GENERATOR}. Do not edit by hand.")?;
    if let Some(digest) = &model.source_digest {
        writeln!(out, "// source sha256: {digest}")?;
    }
    writeln!(out)?;
    writeln!(out, "use std::fmt;")?;
    writeln!(out, "use std::str::FromStr;")?;
    Ok(())
}

fn write_declaration(out: &mut String, model: &EnumModel) -> Result<()> {
    let name = &model.name;
    writeln!(out, "/// XACML function identifiers.")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub enum {name} {{")?;
    for variant in &model.variants {
        writeln!(out, "{INDENT}/// `{}`", doc_text(&variant.uri))?;
        writeln!(out, "{INDENT}{},", variant.name)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl {name} {{")?;
    writeln!(out, "{INDENT}/// Every variant, in table order.")?;
    if model.is_empty() {
        writeln!(out, "{INDENT}pub const ALL: &'static [Self] = &[];")?;
    } else {
        writeln!(out, "{INDENT}pub const ALL: &'static [Self] = &[")?;
        for variant in &model.variants {
            writeln!(out, "{INDENT}{INDENT}Self::{},", variant.name)?;
        }
        writeln!(out, "{INDENT}];")?;
    }
    writeln!(out)?;
    writeln!(out, "{INDENT}/// The identifier URI of this function.")?;
    writeln!(out, "{INDENT}pub fn as_uri(&self) -> &'static str {{")?;
    if model.is_empty() {
        writeln!(out, "{INDENT}{INDENT}match *self {{}}")?;
    } else {
        writeln!(out, "{INDENT}{INDENT}match self {{")?;
        for variant in &model.variants {
            writeln!(
                out,
                "{INDENT}{INDENT}{INDENT}Self::{} => {},",
                variant.name,
                literal(&variant.uri)
            )?;
        }
        writeln!(out, "{INDENT}{INDENT}}}")?;
    }
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl fmt::Display for {name} {{")?;
    writeln!(
        out,
        "{INDENT}fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{"
    )?;
    writeln!(out, "{INDENT}{INDENT}f.write_str(self.as_uri())")?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_lookup(out: &mut String, model: &EnumModel) -> Result<()> {
    let name = &model.name;
    let error = &model.error_name;
    writeln!(
        out,
        "/// Error returned when parsing an identifier that is not in the table."
    )?;
    writeln!(out, "#[derive(Debug, Clone, PartialEq, Eq)]")?;
    writeln!(out, "pub struct {error}(pub String);")?;
    writeln!(out)?;
    writeln!(out, "impl fmt::Display for {error} {{")?;
    writeln!(
        out,
        "{INDENT}fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{"
    )?;
    writeln!(
        out,
        "{INDENT}{INDENT}write!(f, \"unknown function identifier: {{}}\", self.0)"
    )?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl std::error::Error for {error} {{}}")?;
    writeln!(out)?;

    writeln!(out, "impl FromStr for {name} {{")?;
    writeln!(out, "{INDENT}type Err = {error};")?;
    writeln!(out)?;
    writeln!(
        out,
        "{INDENT}fn from_str(s: &str) -> Result<Self, Self::Err> {{"
    )?;
    if model.lookup.is_empty() {
        writeln!(out, "{INDENT}{INDENT}Err({error}(s.to_string()))")?;
    } else {
        writeln!(out, "{INDENT}{INDENT}match s {{")?;
        for entry in &model.lookup {
            let variant = &model.variants[entry.variant];
            writeln!(
                out,
                "{INDENT}{INDENT}{INDENT}{} => Ok(Self::{}),",
                literal(&entry.uri),
                variant.name
            )?;
        }
        writeln!(
            out,
            "{INDENT}{INDENT}{INDENT}_ => Err({error}(s.to_string())),"
        )?;
        writeln!(out, "{INDENT}{INDENT}}}")?;
    }
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_serde(out: &mut String, model: &EnumModel) -> Result<()> {
    let name = &model.name;
    writeln!(out, "impl serde::Serialize for {name} {{")?;
    writeln!(
        out,
        "{INDENT}fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>"
    )?;
    writeln!(out, "{INDENT}where")?;
    writeln!(out, "{INDENT}{INDENT}S: serde::Serializer,")?;
    writeln!(out, "{INDENT}{{")?;
    writeln!(out, "{INDENT}{INDENT}serializer.serialize_str(self.as_uri())")?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl<'de> serde::Deserialize<'de> for {name} {{")?;
    writeln!(
        out,
        "{INDENT}fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>"
    )?;
    writeln!(out, "{INDENT}where")?;
    writeln!(out, "{INDENT}{INDENT}D: serde::Deserializer<'de>,")?;
    writeln!(out, "{INDENT}{{")?;
    writeln!(
        out,
        "{INDENT}{INDENT}let s = <String as serde::Deserialize>::deserialize(deserializer)?;"
    )?;
    writeln!(out, "{INDENT}{INDENT}s.parse().map_err(serde::de::Error::custom)")?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")?;
    Ok(())
}

/// Render only the enum declaration.
pub fn render_declaration(model: &EnumModel) -> Result<String> {
    let mut out = String::new();
    write_declaration(&mut out, model)?;
    Ok(out)
}

/// Render only the reverse lookup.
pub fn render_lookup(model: &EnumModel) -> Result<String> {
    let mut out = String::new();
    write_lookup(&mut out, model)?;
    Ok(out)
}

/// Render the complete generated source file.
pub fn render_rust(model: &EnumModel) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, model)?;
    writeln!(out)?;
    write_declaration(&mut out, model)?;
    writeln!(out)?;
    write_lookup(&mut out, model)?;
    if model.serde {
        writeln!(out)?;
        write_serde(&mut out, model)?;
    }
    Ok(out)
}
