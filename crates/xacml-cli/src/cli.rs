//! CLI argument definitions for the function enum generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use xacml_model::{CollisionPolicy, GenerateOptions};

#[derive(Parser)]
#[command(
    name = "xacml-funcgen",
    version,
    about = "Generate a Rust enum of XACML function identifiers",
    long_about = "Extract `function:` identifiers from the XACML function table (HTML)\n\
                  and generate a Rust enum with a FromStr lookup for policy evaluation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the enum source file from a function table.
    Generate(GenerateArgs),

    /// Print the function catalog without generating code.
    List(ListArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// HTML document containing the function table.
    #[arg(value_name = "TABLE")]
    pub input: PathBuf,

    /// How to handle two identifiers that normalize to the same variant name.
    #[arg(long = "on-collision", value_enum, default_value = "fail")]
    pub on_collision: CollisionArg,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Generated source file.
    #[arg(short, long, value_name = "FILE", default_value = "xacml_enum.rs")]
    pub output: PathBuf,

    /// Name of the generated enum.
    #[arg(long = "enum-name", value_name = "NAME", default_value = "XacmlFunction")]
    pub enum_name: String,

    /// Also generate serde impls that go through the identifier URI.
    #[arg(long = "serde")]
    pub serde: bool,

    /// Accept a table without any function identifiers.
    #[arg(long = "allow-empty")]
    pub allow_empty: bool,

    /// Print the generated code to stdout instead of writing FILE.
    #[arg(long = "dry-run", conflicts_with = "check")]
    pub dry_run: bool,

    /// Fail if FILE is missing or differs from the generated code.
    ///
    /// Nothing is written. Useful in CI to catch a stale generated file.
    #[arg(long = "check")]
    pub check: bool,
}

impl GenerateArgs {
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions::new()
            .with_enum_name(self.enum_name.as_str())
            .with_collision(self.catalog.on_collision.into())
            .with_serde(self.serde)
            .with_allow_empty(self.allow_empty)
    }
}

#[derive(Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output format for the catalog.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CollisionArg {
    /// Abort with an error naming both identifiers.
    Fail,
    /// Append a numeric suffix to later identifiers.
    Suffix,
    /// Keep the first identifier and drop the rest.
    KeepFirst,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Fail => CollisionPolicy::Fail,
            CollisionArg::Suffix => CollisionPolicy::Suffix,
            CollisionArg::KeepFirst => CollisionPolicy::KeepFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["xacml-funcgen", "generate", "table.html"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.output, PathBuf::from("xacml_enum.rs"));
        let options = args.options();
        assert_eq!(options.enum_name, "XacmlFunction");
        assert_eq!(options.collision, CollisionPolicy::Fail);
        assert!(!options.serde && !options.allow_empty);
    }

    #[test]
    fn generate_flags() {
        let cli = Cli::try_parse_from([
            "xacml-funcgen",
            "generate",
            "table.html",
            "-o",
            "src/function_id.rs",
            "--enum-name",
            "FunctionId",
            "--on-collision",
            "keep-first",
            "--serde",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let options = args.options();
        assert_eq!(options.enum_name, "FunctionId");
        assert_eq!(options.collision, CollisionPolicy::KeepFirst);
        assert!(options.serde);
    }

    #[test]
    fn dry_run_conflicts_with_check() {
        let result = Cli::try_parse_from([
            "xacml-funcgen",
            "generate",
            "table.html",
            "--dry-run",
            "--check",
        ]);
        assert!(result.is_err());
    }
}
