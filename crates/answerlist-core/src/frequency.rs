//! Usage-count table loaded from a `word count` corpus.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Default corpus: 50k most frequent English words from OpenSubtitles 2018.
pub const DEFAULT_CORPUS_URL: &str =
    "https://raw.githubusercontent.com/hermitdave/FrequencyWords/refs/heads/master/content/2018/en/en_50k.txt";

const RESOURCE: &str = "frequency corpus";

/// Lowercase word to usage count. Absent words count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Read a corpus line by line. Malformed lines are skipped; a corpus with
    /// no usable lines at all is treated as unavailable.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut counts = HashMap::new();
        let mut skipped = 0usize;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PipelineError::unavailable(RESOURCE, e))?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some((word, count)) => {
                    counts.insert(word, count);
                }
                None => {
                    debug!("skipping malformed corpus line {}: {line:?}", lineno + 1);
                    skipped += 1;
                }
            }
        }

        if counts.is_empty() {
            return Err(PipelineError::unavailable(
                RESOURCE,
                "corpus contained no usable `word count` lines",
            ));
        }
        info!(
            "frequency table: {} words ({} malformed lines skipped)",
            counts.len(),
            skipped
        );
        Ok(Self { counts })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PipelineError::unavailable(RESOURCE, format!("{}: {e}", path.display())))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_corpus_str(corpus: &str) -> Result<Self> {
        Self::from_reader(corpus.as_bytes())
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let counts = iter
            .into_iter()
            .map(|(word, count)| (word.as_ref().trim().to_lowercase(), count))
            .collect();
        Self { counts }
    }
}

/// Parse one `word count` line.
pub fn parse_line(line: &str) -> Option<(String, u64)> {
    let (word, count) = line.trim().split_once(char::is_whitespace)?;
    let word = word.trim();
    if word.is_empty() {
        return None;
    }
    let count = count.trim().parse::<u64>().ok()?;
    Some((word.to_lowercase(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_count_lines() {
        assert_eq!(parse_line("you 22484400"), Some(("you".into(), 22484400)));
        assert_eq!(parse_line("The  17\r"), Some(("the".into(), 17)));
        assert_eq!(parse_line("lonely"), None);
        assert_eq!(parse_line("word x12"), None);
        assert_eq!(parse_line("word -3"), None);
        assert_eq!(parse_line("new york 12"), None);
    }

    #[test]
    fn skips_malformed_lines() {
        let table = FrequencyTable::from_corpus_str("apple 5000\nbroken\n\nrun 9000\nbad line x\n")
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("apple"), 5000);
        assert_eq!(table.get("run"), 9000);
        assert_eq!(table.get("pear"), 0);
    }

    #[test]
    fn later_duplicates_win() {
        let table = FrequencyTable::from_corpus_str("apple 5\nApple 7\n").unwrap();
        assert_eq!(table.get("apple"), 7);
    }

    #[test]
    fn empty_or_missing_corpus_is_unavailable() {
        let err = FrequencyTable::from_corpus_str("garbage\n").unwrap_err();
        assert!(matches!(err, PipelineError::ResourceUnavailable { .. }));

        let err = FrequencyTable::from_path("/nonexistent/corpus.txt").unwrap_err();
        assert!(matches!(err, PipelineError::ResourceUnavailable { .. }));
    }
}
