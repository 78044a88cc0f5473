//! # Catalog Bridge Runtime
//!
//! Loads the source catalog and runs the detection and translation workers.
//!
//! ## Usage
//!
//! ```text
//! node-runtime                                   serve until Ctrl+C
//! node-runtime detect <file>                     detect the sources of an upload
//! node-runtime translate <file> <field> <from> <to>
//! ```
//!
//! Files are looked up in the upload directory. Results land in the result
//! directory as `<token>.<kind>.json`; translated files in the download
//! directory.
//!
//! ## Environment
//!
//! `CB_DB`, `CB_UPLOAD_DIR`, `CB_RESULT_DIR`, `CB_DOWNLOAD_DIR`,
//! `CB_CACHE_CAPACITY`, `CB_QUEUE_CAPACITY`, `CB_MAX_SAMPLES`, `CB_LOG_LEVEL`.

use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use node_runtime::container::{AppContext, RuntimeConfig};
use node_runtime::handlers::TranslateOptions;
use shared_types::JobStatus;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = AppContext::start(config).await?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            info!("Runtime is running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;
            info!("Shutdown complete");
        }
        [cmd, file] if cmd == "detect" => {
            let token = ctx.detector().start(file).await?;
            let report = wait_for(|| ctx.detector().status(&token)).await?;
            print_json(&report)?;
        }
        [cmd, file, field, from, to] if cmd == "translate" => {
            let options = TranslateOptions::new(field.as_str(), from.as_str(), to.as_str());
            let token = ctx.translator_jobs().start(file, options).await?;
            let report = wait_for(|| ctx.translator_jobs().status(&token)).await?;
            print_json(&report)?;
        }
        _ => bail!("usage: node-runtime [detect <file> | translate <file> <field> <from> <to>]"),
    }

    Ok(())
}

/// Poll until the job leaves the pending state.
async fn wait_for<T>(status: impl Fn() -> JobStatus<T>) -> Result<T> {
    loop {
        match status() {
            JobStatus::Pending => tokio::time::sleep(POLL_INTERVAL).await,
            JobStatus::Done(report) => return Ok(report),
            JobStatus::Failed(message) => {
                warn!(%message, "Job failed");
                bail!(message);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
