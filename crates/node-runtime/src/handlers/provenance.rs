//! Methods text, citations and processing log attached to translations.

use chrono::{DateTime, Utc};

use cb_03_source_catalog::Source;

use crate::handlers::translation::TranslationStats;

pub const TOOL_NAME: &str = "Catalog Bridge";

pub const TOOL_CITATION: &str =
    "Jay et al. \"Automated Data Integration tools for reproducible research\" In prep. (2019).";

pub const TOOL_CITATION_RIS: &str = "TY  - UNPB\n\
    AU  - Jay, Jeremy J\n\
    TI  - Automated Data Integration tools for reproducible research\n\
    PY  - 2019\n\
    ER  - \n";

const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SOURCED_DATE_FORMAT: &str = "%-d %B, %Y";

/// Paragraph describing how the identifiers were converted, with numbered
/// references.
pub fn methods_text(from: &Source, to: &Source, stats: &TranslationStats) -> String {
    let sourced = match (from.last_update, to.last_update) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
    .map(|t| t.format(SOURCED_DATE_FORMAT).to_string())
    .unwrap_or_else(|| "an unknown date".to_string());

    let mut text = format!(
        "Source identifiers were recognized as {}s [1], and were converted to {}s [2] using the {} tools [3]. ",
        from.description, to.description, TOOL_NAME
    );

    if stats.source_missing_records > 0 {
        text.push_str(&format!(
            "This conversion resulted in the loss of {}/{} ({:.2}%) source identifiers, \
             likely due to database changes that occurred between original distribution \
             and the mapping data (sourced on {}). ",
            stats.source_missing_records,
            stats.total_records,
            percent(stats.source_missing_records, stats.total_records),
            sourced
        ));
    } else {
        text.push_str(&format!(
            "The mapping data used for identifier conversion was sourced on {}. ",
            sourced
        ));
    }

    if stats.destination_multiple_records > 0 {
        text.push_str(&format!(
            "Because of ambiguity between the identifier types, {}/{} ({:.2}%) {}s were \
             expanded to include multiple associated {}s each. ",
            stats.destination_multiple_records,
            stats.total_records,
            percent(stats.destination_multiple_records, stats.total_records),
            from.description,
            to.description
        ));
    }

    text.push_str(&format!(
        "\n\n  1. {}\n  2. {}\n  3. {}",
        from.cite(),
        to.cite(),
        TOOL_CITATION
    ));
    text
}

/// RIS records for the two sources and the tool, in reference order.
pub fn citations(from: &Source, to: &Source) -> Vec<String> {
    vec![
        from.citation.clone(),
        to.citation.clone(),
        TOOL_CITATION_RIS.to_string(),
    ]
}

/// One timestamped step of a job.
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(at: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            at,
            message: message.into(),
        }
    }
}

/// Chronological processing log, headed by a note on the time zone.
pub fn processing_log(entries: impl IntoIterator<Item = LogEntry>) -> Vec<String> {
    let mut lines: Vec<String> = entries
        .into_iter()
        .map(|e| format!("{} - {}", e.at.format(LOG_TIME_FORMAT), e.message))
        .collect();
    lines.sort();
    lines.insert(
        0,
        format!("- date/times in UTC - processed with the {} tools", TOOL_NAME),
    );
    lines
}

/// Log entries for the source data behind a translation.
pub fn source_entries(sources: &[&Source]) -> Vec<LogEntry> {
    sources
        .iter()
        .filter_map(|s| {
            s.last_update
                .map(|at| LogEntry::new(at, format!("Data fetched for {}", s.description)))
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
