//! Error taxonomy for the materialization pipeline.
//!
//! Extraction, substitution, and materialization failures are fatal: the run
//! aborts with the failing stage identified and the target directory left in
//! its partially built state. Installation failure is the single recoverable
//! case. A pattern that never matches is defined no-op behavior, not an
//! error.

use std::path::PathBuf;

use thiserror::Error;

use super::pipeline::Stage;

/// Template archive could not be read, packed, or unpacked.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot read template {path}: {source}")]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot populate {path}: {source}")]
    WriteTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad archive entry {entry}: {reason}")]
    BadEntry { entry: String, reason: String },

    #[error("cannot pack {path}: {source}")]
    Pack {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file referenced by the rule tree could not be edited.
#[derive(Debug, Error)]
pub enum SubstitutionError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A structural edit for the selected variant could not be completed.
#[derive(Debug, Error)]
pub enum MaterializationError {
    #[error("cannot scan {root} for variant files: {reason}")]
    Scan { root: PathBuf, reason: String },

    #[error("variant file {path} has an unusable name")]
    BadName { path: PathBuf },

    #[error("cannot promote {from} over {to}: {source}")]
    Promote {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Dependency installation failed. Recoverable: the run still completes,
/// with installation left as a manual step.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("`{tool}` is not available: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` exited with {status}")]
    Failed {
        tool: String,
        status: std::process::ExitStatus,
    },
}

/// Any stage failure, tagged with the stage that produced it.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Materialization(#[from] MaterializationError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

impl StageError {
    /// Stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Extraction(_) => Stage::Extract,
            Self::Substitution(_) => Stage::Substitute,
            Self::Materialization(_) => Stage::Materialize,
            Self::Install(_) => Stage::Install,
        }
    }
}

/// Fatal pipeline failure, surfaced to the caller with the failing stage.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct SetupError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}
