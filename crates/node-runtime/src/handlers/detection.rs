//! # Detection Jobs
//!
//! Samples the columns of an uploaded file, guesses each column's value
//! type and asks the detection engine which catalogued sources the values
//! belong to.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use cb_03_source_catalog::SourceInfo;
use cb_04_detection::{classify_column, DetectionEngine, SourceHit};
use shared_types::{FieldInfo, JobOutcome, JobStatus, JobToken};

use crate::adapters::{RecordReader, ResultStore};
use crate::container::RuntimeConfig;
use crate::handlers::error::{JobError, SubmitError};
use crate::handlers::worker::spawn_worker;

/// Result kind under which detection reports are stored.
pub const DETECTION_KIND: &str = "detection";

/// Everything detected about one input file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub token: JobToken,
    pub input_file: String,
    /// Field header to the plausible sources of its values
    pub detected: BTreeMap<String, BTreeMap<String, SourceHit>>,
    /// Fields in file order
    pub fields: Vec<FieldInfo>,
    /// Detected source to the sources it can be translated into
    pub maps: BTreeMap<String, Vec<String>>,
    /// Every catalogued source, by name
    pub sources: BTreeMap<String, SourceInfo>,
}

struct DetectionRequest {
    token: JobToken,
    input_file: String,
}

/// Runs detection jobs to completion.
#[derive(Clone)]
pub struct DetectionWorker {
    engine: DetectionEngine,
    config: Arc<RuntimeConfig>,
    results: ResultStore,
}

impl DetectionWorker {
    pub fn new(engine: DetectionEngine, config: Arc<RuntimeConfig>, results: ResultStore) -> Self {
        Self {
            engine,
            config,
            results,
        }
    }

    /// Detect the sources of every column of an uploaded file.
    #[instrument(skip_all, fields(token = %token, input = input_file))]
    pub fn run(&self, token: &JobToken, input_file: &str) -> Result<DetectionReport, JobError> {
        let path = self.config.upload_path(input_file);
        std::fs::metadata(&path).map_err(JobError::ReadInput)?;
        let mut reader = RecordReader::open(&path).map_err(JobError::ParseInput)?;
        let headers = reader.headers().to_vec();

        let mut samples: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in reader.by_ref().take(self.config.max_samples) {
            let record = record.map_err(JobError::ParseInput)?;
            for (field, values) in record.iter() {
                let column = samples.entry(field.to_string()).or_default();
                column.extend(
                    values
                        .iter()
                        .map(|v| v.trim())
                        .filter(|v| !v.is_empty())
                        .map(str::to_string),
                );
            }
        }

        let empty = Vec::new();
        let fields = headers
            .iter()
            .enumerate()
            .map(|(order, header)| FieldInfo {
                header: header.clone(),
                kind: classify_column(samples.get(header).unwrap_or(&empty)),
                order,
            })
            .collect();

        let catalog = self.engine.catalog();
        let mut detected = BTreeMap::new();
        let mut maps = BTreeMap::new();
        for (header, values) in &samples {
            let hits = self.engine.identify(values);
            for source in hits.keys() {
                maps.entry(source.clone())
                    .or_insert_with(|| catalog.mappings(source));
            }
            detected.insert(header.clone(), hits);
        }

        let sources = catalog
            .sources()
            .map(|s| (s.name.clone(), s.info()))
            .collect();

        info!(
            input = input_file,
            columns = headers.len(),
            detected = detected.values().filter(|h| !h.is_empty()).count(),
            "Detection complete"
        );

        Ok(DetectionReport {
            token: token.clone(),
            input_file: input_file.to_string(),
            detected,
            fields,
            maps,
            sources,
        })
    }

    fn handle(&self, request: DetectionRequest) {
        let result = self.run(&request.token, &request.input_file);
        if let Err(e) = &result {
            error!(
                token = %request.token,
                stage = e.stage(),
                error = %e,
                "Detection job failed"
            );
        }
        let outcome = JobOutcome::from_result(result);
        if let Err(e) = self.results.put(&request.token, DETECTION_KIND, &outcome) {
            error!(token = %request.token, error = %e, "Unable to store detection result");
        }
    }
}

/// Submission handle for the detection queue.
#[derive(Clone)]
pub struct DetectionJobs {
    queue: mpsc::Sender<DetectionRequest>,
    results: ResultStore,
}

impl DetectionJobs {
    /// Start the detection worker. Requires a tokio runtime.
    pub fn spawn(worker: DetectionWorker, capacity: usize) -> Self {
        let results = worker.results.clone();
        let queue = spawn_worker(DETECTION_KIND, capacity, move |request| {
            worker.handle(request)
        });
        Self { queue, results }
    }

    /// Queue detection of an uploaded file. Waits while the queue is full.
    pub async fn start(&self, input_file: &str) -> Result<JobToken, SubmitError> {
        let token = JobToken::from_input(input_file);
        let request = DetectionRequest {
            token: token.clone(),
            input_file: input_file.to_string(),
        };
        self.queue
            .send(request)
            .await
            .map_err(|_| SubmitError::WorkerStopped(DETECTION_KIND))?;
        info!(token = %token, input = input_file, "Detection job queued");
        Ok(token)
    }

    pub fn status(&self, token: &JobToken) -> JobStatus<DetectionReport> {
        self.results.status(token, DETECTION_KIND)
    }
}
