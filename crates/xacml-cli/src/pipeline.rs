//! Generation pipeline: load, parse, normalize, emit, persist.
//!
//! Stages run strictly in order. A failing stage moves the pipeline to
//! [`Stage::Failed`] and the remaining stages are not run.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use xacml_codegen::{CodegenOptions, generate, sha256_hex};
use xacml_ingest::{parse_identifiers, read_document};
use xacml_model::{Catalog, CollisionPolicy, GenerateOptions, RawIdentifier};
use xacml_normalize::build_catalog;

use crate::persist::write_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loaded,
    Parsed,
    Normalized,
    Emitted,
    Persisted,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Loaded => "load",
            Stage::Parsed => "parse",
            Stage::Normalized => "normalize",
            Stage::Emitted => "emit",
            Stage::Persisted => "persist",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("no function identifiers found in {path} (use --allow-empty to accept)")]
    EmptyCatalog { path: PathBuf },

    #[error("markup error at byte {position} of {path}, rows after it would be missing")]
    TruncatedScan { path: PathBuf, position: u64 },

    #[error("{path} is out of date, regenerate it")]
    Stale { path: PathBuf },

    #[error("{path} does not exist")]
    MissingOutput { path: PathBuf },
}

/// Where the generated code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Replace the file atomically.
    Write(PathBuf),
    /// Compare with the existing file without writing.
    Check(PathBuf),
    /// Print to stdout.
    Stdout,
}

/// What the persist stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Written,
    Unchanged,
    UpToDate,
    Printed,
}

/// Loaded input document.
#[derive(Debug)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub text: String,
    pub digest: String,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub input: PathBuf,
    pub digest: String,
    pub catalog: Catalog,
    pub code: String,
    pub persisted: Persisted,
}

/// Tracks the current stage of one run.
#[derive(Debug)]
pub struct Pipeline {
    stage: Stage,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run one stage, advancing to `next` on success and to `Failed` otherwise.
    fn step<T>(&mut self, next: Stage, run: impl FnOnce() -> Result<T>) -> Result<T> {
        if self.stage == Stage::Failed {
            anyhow::bail!("pipeline already failed, not running {next} stage");
        }
        let span = info_span!("stage", stage = %next);
        let _guard = span.enter();
        match run() {
            Ok(value) => {
                debug!(from = %self.stage, to = %next, "stage complete");
                self.stage = next;
                Ok(value)
            }
            Err(error) => {
                debug!(from = %self.stage, error = %error, "stage failed");
                self.stage = Stage::Failed;
                Err(error.context(format!("{next} stage failed")))
            }
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<LoadedDocument> {
        self.step(Stage::Loaded, || load(path))
    }

    pub fn parse(&mut self, document: &LoadedDocument) -> Result<Vec<RawIdentifier>> {
        self.step(Stage::Parsed, || parse(document))
    }

    pub fn normalize(
        &mut self,
        document: &LoadedDocument,
        identifiers: Vec<RawIdentifier>,
        policy: CollisionPolicy,
        allow_empty: bool,
    ) -> Result<Catalog> {
        self.step(Stage::Normalized, || {
            normalize(&document.path, identifiers, policy, allow_empty)
        })
    }

    pub fn emit(
        &mut self,
        document: &LoadedDocument,
        catalog: &Catalog,
        options: &GenerateOptions,
    ) -> Result<String> {
        self.step(Stage::Emitted, || {
            let codegen = CodegenOptions::from(options).with_source_digest(&document.digest);
            generate(catalog, &codegen).context("generate enum source")
        })
    }

    pub fn persist(&mut self, code: &str, mode: &OutputMode) -> Result<Persisted> {
        self.step(Stage::Persisted, || persist(code, mode))
    }
}

fn load(path: &Path) -> Result<LoadedDocument> {
    let text = read_document(path)?;
    let digest = sha256_hex(text.as_bytes());
    info!(path = %path.display(), bytes = text.len(), "loaded function table");
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        text,
        digest,
    })
}

fn parse(document: &LoadedDocument) -> Result<Vec<RawIdentifier>> {
    let parsed = parse_identifiers(&document.text);
    if let Some(position) = parsed.truncated_at {
        return Err(DriverError::TruncatedScan {
            path: document.path.clone(),
            position,
        }
        .into());
    }
    Ok(parsed.identifiers)
}

fn normalize(
    path: &Path,
    identifiers: Vec<RawIdentifier>,
    policy: CollisionPolicy,
    allow_empty: bool,
) -> Result<Catalog> {
    let catalog = build_catalog(identifiers, policy)?;
    if catalog.is_empty() {
        if !allow_empty {
            return Err(DriverError::EmptyCatalog {
                path: path.to_path_buf(),
            }
            .into());
        }
        warn!(path = %path.display(), "no function identifiers found, generating empty enum");
    }
    Ok(catalog)
}

fn persist(code: &str, mode: &OutputMode) -> Result<Persisted> {
    match mode {
        OutputMode::Write(path) => {
            if std::fs::read(path).is_ok_and(|existing| existing == code.as_bytes()) {
                info!(path = %path.display(), "output already up to date");
                return Ok(Persisted::Unchanged);
            }
            write_atomic(path, code.as_bytes())?;
            info!(path = %path.display(), bytes = code.len(), "wrote generated enum");
            Ok(Persisted::Written)
        }
        OutputMode::Check(path) => {
            let existing = match std::fs::read(path) {
                Ok(existing) => existing,
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                    return Err(DriverError::MissingOutput { path: path.clone() }.into());
                }
                Err(error) => {
                    return Err(error).with_context(|| format!("read {}", path.display()));
                }
            };
            if existing != code.as_bytes() {
                return Err(DriverError::Stale { path: path.clone() }.into());
            }
            info!(path = %path.display(), "output is up to date");
            Ok(Persisted::UpToDate)
        }
        OutputMode::Stdout => {
            print!("{code}");
            Ok(Persisted::Printed)
        }
    }
}

/// Load, parse and normalize: everything up to a finished catalog.
pub fn build(
    pipeline: &mut Pipeline,
    input: &Path,
    policy: CollisionPolicy,
    allow_empty: bool,
) -> Result<(LoadedDocument, Catalog)> {
    let document = pipeline.load(input)?;
    let identifiers = pipeline.parse(&document)?;
    let catalog = pipeline.normalize(&document, identifiers, policy, allow_empty)?;
    Ok((document, catalog))
}

/// Run the full pipeline for one input document.
pub fn run(input: &Path, options: &GenerateOptions, mode: &OutputMode) -> Result<PipelineOutcome> {
    let mut pipeline = Pipeline::new();
    let (document, catalog) = build(&mut pipeline, input, options.collision, options.allow_empty)?;
    let code = pipeline.emit(&document, &catalog, options)?;
    let persisted = pipeline.persist(&code, mode)?;
    Ok(PipelineOutcome {
        input: document.path,
        digest: document.digest,
        catalog,
        code,
        persisted,
    })
}
