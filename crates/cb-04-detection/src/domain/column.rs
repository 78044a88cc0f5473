//! Column typing

use regex::Regex;
use shared_types::IdentifierKind;
use std::sync::LazyLock;

/// `PREFIX:digits`, e.g. `HGNC:5` or `GO:0008150`
static PREFIXED_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z]*:[0-9]*$").expect("Invalid prefixed integer regex"));

/// Decide the identifier kind of a column from its sample values.
///
/// Integers also count as floats. Floats win when they outnumber both
/// integers and prefixed integers; integers win when they outnumber prefixed
/// integers; prefixed integers win when there is at least one and they make
/// up at least half of the sample. Anything else, including an empty
/// column, is text.
pub fn classify_column<S: AsRef<str>>(samples: &[S]) -> IdentifierKind {
    if samples.is_empty() {
        return IdentifierKind::Text;
    }
    let mut integers = 0usize;
    let mut floats = 0usize;
    let mut prefixed = 0usize;

    for value in samples {
        let value = value.as_ref();
        if value.parse::<i64>().is_ok() {
            integers += 1;
            floats += 1;
        } else if value.parse::<f64>().is_ok() {
            floats += 1;
        } else if PREFIXED_INTEGER.is_match(value) {
            prefixed += 1;
        }
    }

    if floats > integers && floats > prefixed {
        IdentifierKind::Floats
    } else if integers > prefixed {
        IdentifierKind::Integers
    } else if prefixed > 0 && prefixed >= samples.len() / 2 {
        IdentifierKind::PrefixedIntegers
    } else {
        IdentifierKind::Text
    }
}
