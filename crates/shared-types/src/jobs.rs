//! # Job Envelopes
//!
//! Background jobs are addressed by a token derived from the input file name.
//! Each job writes exactly one result document, a tagged [`JobOutcome`], that
//! pollers read back as a [`JobStatus`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque identifier of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobToken(String);

impl JobToken {
    /// Derive the token for an input file name: hex(sha256(name)).
    pub fn from_input(input_name: &str) -> Self {
        let digest = Sha256::digest(input_name.as_bytes());
        Self(hex::encode(digest))
    }

    /// Wrap an already computed token, e.g. one received from a poller.
    pub fn from_hex(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted result of a job: either a payload or an error message.
///
/// Serialized as `{"status":"ok","payload":...}` or
/// `{"status":"error","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome<T> {
    Ok { payload: T },
    Error { message: String },
}

impl<T> JobOutcome<T> {
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => JobOutcome::Ok { payload },
            Err(e) => JobOutcome::Error {
                message: e.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, JobOutcome::Ok { .. })
    }
}

/// What a poller observes for a job token.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus<T> {
    /// No result has been written yet.
    Pending,
    /// The job finished and its payload is available.
    Done(T),
    /// The job failed, or its result could not be read back.
    Failed(String),
}

impl<T> From<JobOutcome<T>> for JobStatus<T> {
    fn from(outcome: JobOutcome<T>) -> Self {
        match outcome {
            JobOutcome::Ok { payload } => JobStatus::Done(payload),
            JobOutcome::Error { message } => JobStatus::Failed(message),
        }
    }
}
