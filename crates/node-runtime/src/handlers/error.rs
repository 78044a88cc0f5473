//! Job failures

use cb_03_source_catalog::CatalogError;
use thiserror::Error;

use crate::adapters::FormatError;

/// Why a detection or translation job failed. The display text is what the
/// client sees in the stored result.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("unable to read input: {0}")]
    ReadInput(#[source] std::io::Error),

    #[error("unable to parse input: {0}")]
    ParseInput(#[source] FormatError),

    #[error("input has no field '{0}'")]
    UnknownField(String),

    #[error("unknown source '{0}'")]
    UnknownSource(String),

    #[error("unable to get translator: {0}")]
    Translator(#[from] CatalogError),

    #[error("only csv output is currently supported")]
    UnsupportedOutput(String),

    #[error("unable to create output: {0}")]
    CreateOutput(#[source] csv::Error),

    #[error("unable to write to output: {0}")]
    WriteOutput(#[source] csv::Error),
}

impl JobError {
    /// Short label for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            JobError::ReadInput(_) => "read_input",
            JobError::ParseInput(_) | JobError::UnknownField(_) => "parse_input",
            JobError::UnknownSource(_) | JobError::Translator(_) => "translator",
            JobError::UnsupportedOutput(_) => "options",
            JobError::CreateOutput(_) | JobError::WriteOutput(_) => "write_output",
        }
    }
}

/// A job could not be queued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0} worker is not running")]
    WorkerStopped(&'static str),
}
