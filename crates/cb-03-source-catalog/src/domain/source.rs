//! Identifier sources

use cb_01_bloom_index::BloomIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::IdentifierKind;
use std::collections::BTreeMap;

/// One catalogued source of identifiers. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub kind: IdentifierKind,
    pub url: String,
    /// Linkout template with one `%s` placeholder
    pub id_url: String,
    /// Raw RIS citation metadata
    pub citation: String,
    /// Newest `last_update` among the subset indexes
    pub last_update: Option<DateTime<Utc>>,
    pub subsets: BTreeMap<String, BloomIndex>,
}

impl Source {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind: IdentifierKind::Text,
            url: String::new(),
            id_url: String::new(),
            citation: String::new(),
            last_update: None,
            subsets: BTreeMap::new(),
        }
    }

    /// Register a subset index, keeping `last_update` at the newest stamp seen.
    pub fn add_subset(
        &mut self,
        subset: impl Into<String>,
        index: BloomIndex,
        updated: Option<DateTime<Utc>>,
    ) {
        self.subsets.insert(subset.into(), index);
        if updated > self.last_update {
            self.last_update = updated;
        }
    }

    /// URL of the page describing `id`, if the source has a linkout template.
    pub fn linkout(&self, id: &str) -> Option<String> {
        if self.id_url.is_empty() {
            return None;
        }
        Some(self.id_url.replacen("%s", id, 1))
    }

    /// One-line citation built from the RIS metadata.
    ///
    /// Falls back to the description when there is no title.
    pub fn cite(&self) -> String {
        let mut authors = Vec::new();
        let mut title = None;
        let mut journal = None;
        let mut year = None;

        for (tag, value) in ris_fields(&self.citation) {
            match tag {
                "AU" | "A1" => authors.push(value),
                "TI" | "T1" if title.is_none() => title = Some(value),
                "T2" | "JO" | "JF" if journal.is_none() => journal = Some(value),
                "PY" | "Y1" if year.is_none() => year = Some(value),
                _ => {}
            }
        }

        let Some(title) = title else {
            return self.description.clone();
        };

        let mut parts = Vec::new();
        if let Some(first) = authors.first() {
            let surname = first.split(',').next().unwrap_or(first).trim();
            if authors.len() > 1 {
                parts.push(format!("{} et al.", surname));
            } else {
                parts.push(surname.to_string());
            }
        }
        parts.push(format!("\"{}\"", title.trim_end_matches('.')));
        if let Some(journal) = journal {
            parts.push(journal.to_string());
        }
        let mut line = parts.join(" ");
        if let Some(year) = year {
            let year: String = year.chars().take(4).collect();
            line.push_str(&format!(" ({})", year));
        }
        line.push('.');
        line
    }

    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// Serializable description of the source, without its indexes.
    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            url: self.url.clone(),
            id_url: self.id_url.clone(),
            last_update: self.last_update,
            subsets: self.subsets.keys().cloned().collect(),
        }
    }
}

/// What clients are told about a source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: IdentifierKind,
    pub url: String,
    pub id_url: String,
    pub last_update: Option<DateTime<Utc>>,
    pub subsets: Vec<String>,
}

/// Iterate `(tag, value)` pairs of RIS text (`TAG  - value` lines).
fn ris_fields(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines().filter_map(|line| {
        let line = line.trim();
        let (tag, value) = line.split_once('-')?;
        let tag = tag.trim();
        let value = value.trim();
        if tag.len() != 2 || value.is_empty() {
            return None;
        }
        Some((tag, value))
    })
}
