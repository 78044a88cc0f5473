//! # Translation Jobs
//!
//! Rewrites one field of an uploaded file from one source's identifiers to
//! another's and writes the result as a downloadable CSV, together with
//! conversion statistics and a methods paragraph.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use cb_03_source_catalog::SourceCatalog;
use shared_types::{JobOutcome, JobStatus, JobToken};

use crate::adapters::{RecordReader, ResultStore};
use crate::container::RuntimeConfig;
use crate::handlers::error::{JobError, SubmitError};
use crate::handlers::provenance::{self, LogEntry};
use crate::handlers::worker::spawn_worker;

/// Result kind under which translation reports are stored.
pub const MAPPING_KIND: &str = "mapping";

/// Separator between multiple values written into one output cell.
const OUTPUT_VALUE_SEPARATOR: &str = "|";

/// What to translate and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateOptions {
    pub from_field: String,
    pub from_source: String,
    pub to_source: String,
    /// Overwrite `from_field` instead of adding a column named after the
    /// target source
    #[serde(default)]
    pub replace: bool,
    /// Leave out records with any untranslatable identifier
    #[serde(default)]
    pub drop_missing: bool,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_output_format() -> String {
    "csv".to_string()
}

impl TranslateOptions {
    pub fn new(
        from_field: impl Into<String>,
        from_source: impl Into<String>,
        to_source: impl Into<String>,
    ) -> Self {
        Self {
            from_field: from_field.into(),
            from_source: from_source.into(),
            to_source: to_source.into(),
            replace: false,
            drop_missing: false,
            output_format: default_output_format(),
        }
    }
}

/// Counters gathered while translating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslationStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_records: usize,
    /// Identifiers with no translation
    pub source_missing_values: usize,
    /// Records with at least one untranslatable identifier
    pub source_missing_records: usize,
    /// Identifiers that translated to more than one target
    pub destination_multiple_values: usize,
    /// Extra targets beyond the first, summed over all identifiers
    pub destination_multiple_new_count: usize,
    /// Records with at least one ambiguous identifier
    pub destination_multiple_records: usize,
}

impl TranslationStats {
    pub fn started(at: DateTime<Utc>) -> Self {
        Self {
            start_time: at,
            end_time: at,
            total_records: 0,
            source_missing_values: 0,
            source_missing_records: 0,
            destination_multiple_values: 0,
            destination_multiple_new_count: 0,
            destination_multiple_records: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslationReport {
    pub token: JobToken,
    pub input_file: String,
    pub options: TranslateOptions,
    /// Name of the output file in the download directory
    pub new_filename: String,
    pub stats: TranslationStats,
    pub methods: String,
    /// RIS records for the references in `methods`
    pub citations: Vec<String>,
    pub log: Vec<String>,
}

struct TranslationRequest {
    token: JobToken,
    input_file: String,
    options: TranslateOptions,
}

/// Runs translation jobs to completion.
#[derive(Clone)]
pub struct TranslationWorker {
    catalog: Arc<SourceCatalog>,
    config: Arc<RuntimeConfig>,
    results: ResultStore,
}

impl TranslationWorker {
    pub fn new(
        catalog: Arc<SourceCatalog>,
        config: Arc<RuntimeConfig>,
        results: ResultStore,
    ) -> Self {
        Self {
            catalog,
            config,
            results,
        }
    }

    #[instrument(skip_all, fields(token = %token, input = input_file))]
    pub fn run(
        &self,
        token: &JobToken,
        input_file: &str,
        options: &TranslateOptions,
    ) -> Result<TranslationReport, JobError> {
        if options.output_format != "csv" {
            return Err(JobError::UnsupportedOutput(options.output_format.clone()));
        }
        let translator = self
            .catalog
            .get_translator(&options.from_source, &options.to_source)?;
        let from = self
            .catalog
            .source(&options.from_source)
            .ok_or_else(|| JobError::UnknownSource(options.from_source.clone()))?;
        let to = self
            .catalog
            .source(&options.to_source)
            .ok_or_else(|| JobError::UnknownSource(options.to_source.clone()))?;

        let input_path = self.config.upload_path(input_file);
        let uploaded = std::fs::metadata(&input_path).map_err(JobError::ReadInput)?;
        let reader = RecordReader::open(&input_path).map_err(JobError::ParseInput)?;
        if !reader.headers().iter().any(|h| h == &options.from_field) {
            return Err(JobError::UnknownField(options.from_field.clone()));
        }

        let new_field = if options.replace {
            options.from_field.clone()
        } else {
            to.name.clone()
        };
        let mut header = reader.headers().to_vec();
        if !header.contains(&new_field) {
            header.push(new_field.clone());
        }

        let new_filename = translated_name(input_file);
        let output_path = self.config.download_path(&new_filename);
        let mut writer = csv::Writer::from_path(&output_path).map_err(JobError::CreateOutput)?;
        writer.write_record(&header).map_err(JobError::WriteOutput)?;

        let mut stats = TranslationStats::started(Utc::now());
        for record in reader {
            let mut record = record.map_err(JobError::ParseInput)?;
            stats.total_records += 1;

            let mut missing = false;
            let mut multiple = false;
            let mut translated = Vec::new();
            for value in record.values(&options.from_field) {
                match translator.get(value.trim()) {
                    None => {
                        missing = true;
                        stats.source_missing_values += 1;
                    }
                    Some(targets) => {
                        if targets.len() > 1 {
                            multiple = true;
                            stats.destination_multiple_values += 1;
                            stats.destination_multiple_new_count += targets.len() - 1;
                        }
                        translated.extend(targets);
                    }
                }
            }
            record.set(&new_field, translated);

            if multiple {
                stats.destination_multiple_records += 1;
            }
            if missing {
                stats.source_missing_records += 1;
                if options.drop_missing {
                    continue;
                }
            }
            writer
                .write_record(record.joined_cells(OUTPUT_VALUE_SEPARATOR))
                .map_err(JobError::WriteOutput)?;
        }
        writer
            .flush()
            .map_err(|e| JobError::WriteOutput(e.into()))?;
        drop(writer);
        stats.end_time = Utc::now();

        let written = std::fs::metadata(&output_path).map_err(JobError::ReadInput)?;
        let mut entries = provenance::source_entries(&[from, to]);
        entries.push(LogEntry::new(
            modified_at(&uploaded).unwrap_or(stats.start_time),
            format!(
                "Source data uploaded ({} byte {})",
                uploaded.len(),
                extension_label(&input_path)
            ),
        ));
        entries.push(LogEntry::new(
            modified_at(&written).unwrap_or(stats.end_time),
            format!("Data mapping completed ({} byte .csv)", written.len()),
        ));

        info!(
            from = %from.name,
            to = %to.name,
            records = stats.total_records,
            missing = stats.source_missing_records,
            expanded = stats.destination_multiple_records,
            output = %new_filename,
            "Translation complete"
        );
        debug!(
            cached = translator.cached_len(),
            hit_rate = translator.metrics().snapshot().hit_rate(),
            "Translator cache"
        );

        Ok(TranslationReport {
            token: token.clone(),
            input_file: input_file.to_string(),
            options: options.clone(),
            new_filename,
            methods: provenance::methods_text(from, to, &stats),
            citations: provenance::citations(from, to),
            log: provenance::processing_log(entries),
            stats,
        })
    }

    fn handle(&self, request: TranslationRequest) {
        let result = self.run(&request.token, &request.input_file, &request.options);
        if let Err(e) = &result {
            error!(
                token = %request.token,
                stage = e.stage(),
                error = %e,
                "Translation job failed"
            );
        }
        let outcome = JobOutcome::from_result(result);
        if let Err(e) = self.results.put(&request.token, MAPPING_KIND, &outcome) {
            error!(token = %request.token, error = %e, "Unable to store translation result");
        }
    }
}

/// `genes.tsv` becomes `genes.translated.csv`.
pub fn translated_name(input_file: &str) -> String {
    let stem = Path::new(input_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}.translated.csv", stem)
}

fn extension_label(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

fn modified_at(meta: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    meta.modified().ok().map(DateTime::<Utc>::from)
}

/// Submission handle for the translation queue.
#[derive(Clone)]
pub struct TranslationJobs {
    queue: mpsc::Sender<TranslationRequest>,
    results: ResultStore,
}

impl TranslationJobs {
    /// Start the translation worker. Requires a tokio runtime.
    pub fn spawn(worker: TranslationWorker, capacity: usize) -> Self {
        let results = worker.results.clone();
        let queue = spawn_worker(MAPPING_KIND, capacity, move |request| {
            worker.handle(request)
        });
        Self { queue, results }
    }

    /// Queue a translation of an uploaded file. Waits while the queue is full.
    pub async fn start(
        &self,
        input_file: &str,
        options: TranslateOptions,
    ) -> Result<JobToken, SubmitError> {
        let token = JobToken::from_input(input_file);
        let request = TranslationRequest {
            token: token.clone(),
            input_file: input_file.to_string(),
            options,
        };
        self.queue
            .send(request)
            .await
            .map_err(|_| SubmitError::WorkerStopped(MAPPING_KIND))?;
        info!(token = %token, input = input_file, "Translation job queued");
        Ok(token)
    }

    pub fn status(&self, token: &JobToken) -> JobStatus<TranslationReport> {
        self.results.status(token, MAPPING_KIND)
    }
}
