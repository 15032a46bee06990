use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Final ranked answers keyed by lemma length.
///
/// Every lemma's character length equals its key and no lemma appears twice
/// anywhere in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    buckets: BTreeMap<usize, Vec<String>>,
}

impl AnswerSet {
    pub(crate) fn from_buckets(buckets: BTreeMap<usize, Vec<String>>) -> Self {
        Self { buckets }
    }

    pub fn bucket(&self, len: usize) -> Option<&[String]> {
        self.buckets.get(&len).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
        self.buckets.iter().map(|(len, words)| (*len, words.as_slice()))
    }

    /// Number of lemmas across all buckets.
    pub fn word_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count() == 0
    }

    /// Two-space indented JSON with keys in ascending numeric order.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(PipelineError::Serialize)
    }
}
