//! Resize instruction execution.
//!
//! Consumes the instruction list from [`plan`](crate::plan) and materializes
//! each output file through the [`ImageBackend`]. Instructions are mutually
//! independent once planned (the plan deduplicates shared filenames), so they
//! run under rayon's `par_iter`; results are collected back in instruction
//! order, which keeps error reporting deterministic. Manifest content is
//! fixed at plan time, so completion order never shows in the output.
//!
//! Failure policy: the first failing instruction (in plan order) aborts the
//! request. Files written by earlier or concurrent instructions are left in
//! place — there is no rollback.

use crate::imaging::{BackendError, ImageBackend, Quality, ResizeParams, SourceInfo};
use crate::plan::ResizeInstruction;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("output path {0} exists and is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// One materialized output file, with the concrete dimensions it was
/// rendered at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Create the set directory if needed. An existing non-directory at the path
/// is an error, before any per-variant work begins.
fn ensure_dir(path: &Path) -> Result<(), ExecuteError> {
    if path.exists() && !path.is_dir() {
        return Err(ExecuteError::NotADirectory(path.to_path_buf()));
    }
    std::fs::create_dir_all(path).map_err(|source| ExecuteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Run every instruction against the backend, returning the generated files
/// in instruction order.
pub fn execute(
    backend: &impl ImageBackend,
    source: &SourceInfo,
    source_path: &Path,
    set_dir: &Path,
    instructions: &[ResizeInstruction],
    quality: Quality,
) -> Result<Vec<GeneratedFile>, ExecuteError> {
    ensure_dir(set_dir)?;

    let results: Vec<Result<GeneratedFile, BackendError>> = instructions
        .par_iter()
        .map(|instruction| {
            let (width, height) = instruction.target.against((source.width, source.height));
            backend.resize(&ResizeParams {
                source: source_path.to_path_buf(),
                output: set_dir.join(&instruction.filename),
                width,
                height,
                format: instruction.format,
                quality,
            })?;
            Ok(GeneratedFile {
                filename: instruction.filename.clone(),
                width,
                height,
            })
        })
        .collect();

    results
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(ExecuteError::from)
}
