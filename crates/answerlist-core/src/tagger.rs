//! Single-token part-of-speech taggers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use answerlist_types::{Tag, Tagger};
use tracing::{info, warn};

use crate::error::{PipelineError, Result};

/// Tags by capitalization alone.
///
/// An uppercase first letter means a proper noun (plural when the token
/// also ends in `s`); anything else is a common noun. This is how a
/// statistical tagger behaves on a token presented without context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseTagger;

impl Tagger for CaseTagger {
    fn tag(&self, token: &str) -> Tag {
        let token = token.trim();
        match token.chars().next() {
            Some(first) if first.is_uppercase() => {
                if token.chars().count() > 1 && token.ends_with('s') {
                    Tag::ProperNounPlural
                } else {
                    Tag::ProperNoun
                }
            }
            _ => Tag::Noun,
        }
    }
}

/// Precomputed tags read from `token<TAB>TAG` lines, falling back to
/// [`CaseTagger`] for tokens the table does not cover.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    tags: HashMap<String, Tag>,
    fallback: CaseTagger,
}

impl TagTable {
    /// Keys are exact-case tokens. Blank lines and `#` comments are ignored;
    /// lines without a tab separator are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tags = HashMap::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PipelineError::unavailable("tag table", e))?;
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((token, tag)) = trimmed.split_once('\t') else {
                warn!("tag table line {} has no tab separator, skipping", lineno + 1);
                continue;
            };
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            tags.insert(token.to_string(), Tag::from_penn(tag));
        }
        info!("tag table: {} tokens", tags.len());
        Ok(Self {
            tags,
            fallback: CaseTagger,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PipelineError::unavailable("tag table", format!("{}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Tagger for TagTable {
    fn tag(&self, token: &str) -> Tag {
        match self.tags.get(token.trim()) {
            Some(tag) => *tag,
            None => self.fallback.tag(token),
        }
    }
}
