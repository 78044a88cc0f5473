//! Sequential job queue
//!
//! One task per queue receives jobs in submission order and runs each on the
//! blocking pool, waiting for it to finish before taking the next. A job that
//! panics is logged and the queue carries on.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

/// Spawn a worker and return the sending half of its bounded queue.
///
/// Must be called from inside a tokio runtime.
pub(crate) fn spawn_worker<J, F>(name: &'static str, capacity: usize, run: F) -> mpsc::Sender<J>
where
    J: Send + 'static,
    F: Fn(J) + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::channel::<J>(capacity.max(1));
    let run = Arc::new(run);

    tokio::spawn(async move {
        info!(worker = name, capacity, "Job worker started");
        while let Some(job) = rx.recv().await {
            let run = Arc::clone(&run);
            if let Err(e) = tokio::task::spawn_blocking(move || run(job)).await {
                error!(worker = name, error = %e, "Job aborted");
            }
        }
        info!(worker = name, "Job worker stopped");
    });

    tx
}
