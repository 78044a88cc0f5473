//! Tabular input readers
//!
//! Inputs are chosen by extension: `.csv` is comma separated with `;`
//! between multiple values in one cell, `.tsv`/`.tab`/`.txt` are tab
//! separated with `|` between values. Descriptive lines above the header are
//! skipped: the header is the first row whose column count is the most
//! frequent among the leading rows.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use shared_types::Record;
use thiserror::Error;

/// Rows examined to find the dominant column count
const HEADER_SCAN_ROWS: usize = 5000;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported input format '{0}'")]
    Unsupported(String),

    #[error("input has no rows")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "tsv" | "tab" | "txt" => Ok(InputFormat::Tsv),
            _ => Err(FormatError::Unsupported(ext)),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            InputFormat::Csv => b',',
            InputFormat::Tsv => b'\t',
        }
    }

    fn value_separator(self) -> char {
        match self {
            InputFormat::Csv => ';',
            InputFormat::Tsv => '|',
        }
    }
}

/// Streams [`Record`]s from a CSV or TSV file.
pub struct RecordReader {
    format: InputFormat,
    headers: Vec<String>,
    rows: StringRecordsIntoIter<File>,
}

impl RecordReader {
    pub fn open(path: &Path) -> Result<Self, FormatError> {
        let format = InputFormat::from_path(path)?;
        let width = dominant_width(path, format)?;

        let mut rows = builder(format).from_path(path)?.into_records();
        let headers = loop {
            match rows.next() {
                Some(row) => {
                    let row = row?;
                    if row.len() == width {
                        break header_names(&row);
                    }
                }
                None => return Err(FormatError::Empty),
            }
        };

        Ok(Self {
            format,
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        let separator = self.format.value_separator();
        let values = row
            .iter()
            .map(|cell| cell.split(separator).map(str::to_string).collect())
            .collect();
        Some(Ok(Record::from_values(&self.headers, values)))
    }
}

fn builder(format: InputFormat) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(format.delimiter())
        .has_headers(false)
        .flexible(true);
    builder
}

/// Most frequent column count among the leading rows; the earliest count
/// wins a tie.
fn dominant_width(path: &Path, format: InputFormat) -> Result<usize, FormatError> {
    let mut reader = builder(format).from_path(path)?;
    let mut counts: HashMap<usize, usize> = HashMap::new();
    let mut best = None;

    for row in reader.records().take(HEADER_SCAN_ROWS) {
        let width = row?.len();
        let seen = counts.entry(width).or_insert(0);
        *seen += 1;
        let seen = *seen;
        match best {
            Some((_, n)) if n >= seen => {}
            _ => best = Some((width, seen)),
        }
    }
    best.map(|(width, _)| width).ok_or(FormatError::Empty)
}

fn header_names(row: &StringRecord) -> Vec<String> {
    row.iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect()
}
