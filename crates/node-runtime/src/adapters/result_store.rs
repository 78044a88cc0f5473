//! On-disk job results
//!
//! Each job writes one JSON document named `<token>.<kind>.json`. A missing
//! document means the job is still pending.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{JobOutcome, JobStatus, JobToken};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("failed to write result {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Directory of persisted job outcomes
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, token: &JobToken, kind: &str) -> PathBuf {
        self.dir.join(format!("{}.{}.json", token, kind))
    }

    /// Persist an outcome. The document appears atomically, so a poller
    /// never reads a half-written result.
    pub fn put<T: Serialize>(
        &self,
        token: &JobToken,
        kind: &str,
        outcome: &JobOutcome<T>,
    ) -> Result<(), ResultStoreError> {
        let path = self.path(token, kind);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(outcome)?;

        std::fs::write(&tmp, body).map_err(|source| ResultStoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| ResultStoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(token = %token, kind, ok = outcome.is_ok(), "Stored job result");
        Ok(())
    }

    /// Read back the status of a job.
    pub fn status<T: DeserializeOwned>(&self, token: &JobToken, kind: &str) -> JobStatus<T> {
        let path = self.path(token, kind);
        let body = match std::fs::read(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return JobStatus::Pending,
            Err(e) => {
                warn!(token = %token, kind, error = %e, "Unreadable job result");
                return JobStatus::Failed(format!("unable to read result: {}", e));
            }
        };
        match serde_json::from_slice::<JobOutcome<T>>(&body) {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                warn!(token = %token, kind, error = %e, "Corrupt job result");
                JobStatus::Failed(format!("unable to parse result: {}", e))
            }
        }
    }
}
