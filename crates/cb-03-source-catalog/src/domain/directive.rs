//! Mapping directives between two sources

use chrono::{DateTime, Utc};

/// A stored pair of mapping queries between two sources.
///
/// `left_id < right_id`; `query_lr` maps left identifiers to right ones and
/// `query_rl` the reverse.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingDirective {
    pub left_id: i64,
    pub right_id: i64,
    pub query_lr: String,
    pub query_rl: String,
    pub element_count: u64,
    pub last_update: Option<DateTime<Utc>>,
}

impl MappingDirective {
    /// Query translating identifiers of `from_id` into the other side.
    ///
    /// Returns `None` if `from_id` is not part of this directive.
    pub fn query_from(&self, from_id: i64) -> Option<&str> {
        if from_id == self.left_id {
            Some(&self.query_lr)
        } else if from_id == self.right_id {
            Some(&self.query_rl)
        } else {
            None
        }
    }

    /// The source on the other side of `id`.
    pub fn other_side(&self, id: i64) -> Option<i64> {
        if id == self.left_id {
            Some(self.right_id)
        } else if id == self.right_id {
            Some(self.left_id)
        } else {
            None
        }
    }
}
