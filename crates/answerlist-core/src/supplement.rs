use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{PipelineError, Result};

/// Pre-vetted words for one bucket, used in place of the pipeline's own output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplement {
    len: usize,
    words: Vec<String>,
}

impl Supplement {
    /// Words are kept in file order. Blank lines are ignored; duplicates and
    /// words whose character length is not `len` are dropped with a warning.
    pub fn from_reader<R: BufRead>(reader: R, len: usize) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PipelineError::unavailable("supplementary list", e))?;
            let word = line.trim().trim_matches('"');
            if word.is_empty() {
                continue;
            }
            let word_len = word.chars().count();
            if word_len != len {
                warn!(
                    "supplementary line {}: {word:?} has length {word_len}, expected {len}",
                    lineno + 1
                );
                continue;
            }
            if !seen.insert(word.to_string()) {
                warn!("supplementary line {}: duplicate {word:?}", lineno + 1);
                continue;
            }
            words.push(word.to_string());
        }
        info!("supplementary list: {} words of length {len}", words.len());
        Ok(Self { len, words })
    }

    pub fn from_path(path: impl AsRef<Path>, len: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PipelineError::unavailable("supplementary list", format!("{}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file), len)
    }

    /// Character length every word in the list has.
    pub fn target_len(&self) -> usize {
        self.len
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drops_bad_lines() {
        let list = "crane\n\"slate\"\n\nbeach\ncrane\nlonger\n  adieu  \n";
        let supplement = Supplement::from_reader(list.as_bytes(), 5).unwrap();
        assert_eq!(supplement.target_len(), 5);
        assert_eq!(supplement.words(), ["crane", "slate", "beach", "adieu"]);
    }
}
