use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};

/// Raw candidate words grouped by character length.
///
/// Serialized as a JSON object keyed by stringified length (`{"5": [...]}`).
/// Buckets iterate in ascending length; token order inside a bucket is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawWordPool {
    buckets: BTreeMap<usize, Vec<String>>,
}

impl RawWordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON form. Keys that are not non-negative integers, or values
    /// that are not arrays of strings, are rejected as malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PipelineError::MalformedInput(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| PipelineError::MalformedInput(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Group a plain word list (one word per line, optionally double-quoted)
    /// by character length.
    pub fn from_word_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut pool = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim().trim_matches('"');
            if !word.is_empty() {
                pool.push(word);
            }
        }
        info!(
            "grouped {} words into {} length buckets",
            pool.token_count(),
            pool.buckets.len()
        );
        Ok(pool)
    }

    /// Append a word to the bucket matching its character length.
    pub fn push(&mut self, word: impl Into<String>) {
        let word = word.into();
        self.buckets
            .entry(word.chars().count())
            .or_default()
            .push(word);
    }

    pub fn bucket(&self, len: usize) -> Option<&[String]> {
        self.buckets.get(&len).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
        self.buckets.iter().map(|(len, words)| (*len, words.as_slice()))
    }

    /// Total number of tokens across all buckets.
    pub fn token_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(PipelineError::Serialize)
    }
}

impl<S: Into<String>> FromIterator<S> for RawWordPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pool = Self::new();
        for word in iter {
            pool.push(word);
        }
        pool
    }
}
