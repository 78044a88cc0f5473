//! # Runtime Configuration
//!
//! Paths, cache sizing and worker limits, with defaults and `CB_*`
//! environment overrides.

use std::path::{Path, PathBuf};

use cb_02_id_mapping::TranslatorConfig;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// SQLite database holding sources, indexes and mapping tables.
    pub database: PathBuf,
    /// Directory of uploaded input files.
    pub upload_dir: PathBuf,
    /// Directory of persisted job results.
    pub result_dir: PathBuf,
    /// Directory of translated output files.
    pub download_dir: PathBuf,
    /// Cached identifiers per translator.
    pub cache_capacity: usize,
    /// Pending jobs per worker before submitters wait.
    pub queue_capacity: usize,
    /// Records sampled from an input for detection.
    pub max_samples: usize,
    /// Tracing filter directive.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("sources.sqlite"),
            upload_dir: PathBuf::from("./uploads"),
            result_dir: PathBuf::from("./results"),
            download_dir: PathBuf::from("./downloads"),
            cache_capacity: 100_000,
            queue_capacity: 4,
            max_samples: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `CB_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `CB_*` key.
    ///
    /// Unparseable numbers are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("CB_DB") {
            config.database = PathBuf::from(path);
        }
        if let Some(dir) = lookup("CB_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("CB_RESULT_DIR") {
            config.result_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("CB_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }
        override_number(&lookup, "CB_CACHE_CAPACITY", &mut config.cache_capacity);
        override_number(&lookup, "CB_QUEUE_CAPACITY", &mut config.queue_capacity);
        override_number(&lookup, "CB_MAX_SAMPLES", &mut config.max_samples);
        if let Some(level) = lookup("CB_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Reject limits that would make the runtime unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroLimit("CB_CACHE_CAPACITY"));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroLimit("CB_QUEUE_CAPACITY"));
        }
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroLimit("CB_MAX_SAMPLES"));
        }
        Ok(())
    }

    /// Create the upload, result and download directories.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [&self.upload_dir, &self.result_dir, &self.download_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn translator(&self) -> TranslatorConfig {
        TranslatorConfig {
            cache_capacity: self.cache_capacity,
        }
    }

    /// Path of an uploaded file. Only the final path component of `name` is used.
    pub fn upload_path(&self, name: &str) -> PathBuf {
        self.upload_dir.join(file_name(name))
    }

    /// Path of a downloadable output file.
    pub fn download_path(&self, name: &str) -> PathBuf {
        self.download_dir.join(file_name(name))
    }
}

fn file_name(name: &str) -> &Path {
    Path::new(name)
        .file_name()
        .map(Path::new)
        .unwrap_or_else(|| Path::new(""))
}

fn override_number(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut usize) {
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, value = %raw, "Ignoring non-numeric configuration value"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A limit that must be positive was set to zero.
    ZeroLimit(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroLimit(key) => write!(f, "{} must be greater than zero", key),
        }
    }
}

impl std::error::Error for ConfigError {}
