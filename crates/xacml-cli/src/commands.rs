use anyhow::{Context, Result};
use tracing::info_span;

use crate::cli::{GenerateArgs, ListArgs, ListFormatArg};
use crate::pipeline::{self, OutputMode, Pipeline, PipelineOutcome};
use crate::summary::{catalog_table, print_summary};

fn output_mode(args: &GenerateArgs) -> OutputMode {
    if args.dry_run {
        OutputMode::Stdout
    } else if args.check {
        OutputMode::Check(args.output.clone())
    } else {
        OutputMode::Write(args.output.clone())
    }
}

pub fn run_generate(args: &GenerateArgs) -> Result<PipelineOutcome> {
    let input = &args.catalog.input;
    let span = info_span!("generate", input = %input.display());
    let _guard = span.enter();
    let mode = output_mode(args);
    let outcome = pipeline::run(input, &args.options(), &mode)?;
    if mode != OutputMode::Stdout {
        print_summary(&outcome, &args.output.display().to_string());
    }
    Ok(outcome)
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let input = &args.catalog.input;
    let span = info_span!("list", input = %input.display());
    let _guard = span.enter();
    let mut pipeline = Pipeline::new();
    let (_, catalog) = pipeline::build(
        &mut pipeline,
        input,
        args.catalog.on_collision.into(),
        true,
    )?;
    match args.format {
        ListFormatArg::Table => println!("{}", catalog_table(&catalog)),
        ListFormatArg::Json => {
            let json = serde_json::to_string_pretty(&catalog).context("serialize catalog")?;
            println!("{json}");
        }
    }
    Ok(())
}
