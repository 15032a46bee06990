//! WordNet-backed lemma and vocabulary oracles.
//!
//! Loads the lemma column of the canonical `index.*` files plus the morphy
//! exception lists (`*.exc`) and exposes them through the
//! [`answerlist_types::Lemmatizer`] and [`answerlist_types::Vocabulary`]
//! traits. Callers choose between memory-mapped files or owned buffers at
//! runtime via [`LoadMode`].
//!
//! # How lemmatization works
//! 1. Ask [`Morphy`] for every verified base form of the word under one POS.
//! 2. Keep the shortest one (first on ties).
//! 3. Fall back to the normalized word when nothing verifies.
//!
//! # Example
//! ```no_run
//! use answerlist_types::{Lemmatizer, Pos, Vocabulary};
//! use wordnet_lexicon::{Lexicon, LoadMode};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lexicon = Lexicon::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! assert_eq!(lexicon.lemmatize("running", Pos::Verb), "run");
//! assert!(lexicon.contains("dog"));
//! # Ok(()) }
//! ```

mod morphy;

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use answerlist_types::{Lemmatizer, Pos, Vocabulary};
use memmap2::Mmap;
use tracing::debug;

pub use morphy::{FormSource, Morphy, MorphyForm};

use morphy::normalize;

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each WordNet file.
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

impl LoadMode {
    /// Parse `mmap` or `owned`, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

const INDEX_FILES: [(Pos, &str); 4] = [
    (Pos::Noun, "index.noun"),
    (Pos::Verb, "index.verb"),
    (Pos::Adj, "index.adj"),
    (Pos::Adv, "index.adv"),
];

/// Lemma sets per POS together with morphy exception data.
pub struct Lexicon {
    lemmas: HashSet<(Pos, String)>,
    words: HashSet<String>,
    morphy: Morphy,
}

impl Lexicon {
    /// Load from a directory containing `index.*` (required) and `*.exc` (optional) files.
    ///
    /// Defaults to memory-mapping the index files.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        for (_, name) in &INDEX_FILES {
            let path = dir.join(name);
            if !path.exists() {
                anyhow::bail!("missing required WordNet file: {}", path.display());
            }
        }

        let mut lemmas = HashSet::new();
        for (pos, name) in INDEX_FILES {
            let buffer = load_file(dir.join(name), mode)?;
            let count = parse_index(buffer.as_slice(), name, pos, &mut lemmas)?;
            debug!("parsed {count} {pos} index entries from {name}");
        }
        let morphy = Morphy::load(dir)?;

        Ok(Self::assemble(lemmas, morphy))
    }

    /// Build from in-memory lemmas, mainly for callers that ship their own data.
    pub fn from_lemmas<'a, I>(lemmas: I, morphy: Morphy) -> Self
    where
        I: IntoIterator<Item = (Pos, &'a str)>,
    {
        let lemmas = lemmas
            .into_iter()
            .map(|(pos, lemma)| (pos, normalize(lemma)))
            .collect();
        Self::assemble(lemmas, morphy)
    }

    fn assemble(lemmas: HashSet<(Pos, String)>, morphy: Morphy) -> Self {
        let words = lemmas.iter().map(|(_, lemma)| lemma.clone()).collect();
        Self {
            lemmas,
            words,
            morphy,
        }
    }

    /// Check whether a lemma exists for the given POS.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemmas.contains(&(pos, normalize(lemma)))
    }

    /// True when the word is a lemma under any POS.
    pub fn is_known_word(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    /// Verified base forms of `surface` under `pos`.
    pub fn forms_for(&self, pos: Pos, surface: &str) -> Vec<MorphyForm> {
        self.morphy
            .forms_for(pos, surface, |p, lemma| self.lemma_exists(p, lemma))
    }

    /// Number of `(pos, lemma)` pairs loaded.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Number of distinct lemma strings across all parts of speech.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn morphy(&self) -> &Morphy {
        &self.morphy
    }
}

impl Lemmatizer for Lexicon {
    fn lemmatize(&self, word: &str, pos: Pos) -> String {
        let mut shortest: Option<String> = None;
        for form in self.forms_for(pos, word) {
            let better = shortest
                .as_ref()
                .is_none_or(|best| form.lemma.chars().count() < best.chars().count());
            if better {
                shortest = Some(form.lemma);
            }
        }
        shortest.unwrap_or_else(|| normalize(word))
    }
}

impl Vocabulary for Lexicon {
    fn contains(&self, word: &str) -> bool {
        self.is_known_word(word)
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            // SAFETY: the map is read-only and dictionary files are not modified while mapped.
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Collect the lemma column of an `index.*` file. Returns the number of entries.
fn parse_index(
    bytes: &[u8],
    file: &str,
    pos: Pos,
    lemmas: &mut HashSet<(Pos, String)>,
) -> Result<usize> {
    let mut count = 0usize;
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        // License header lines are indented.
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{file}:{} is not valid utf8", lineno + 1))?;
        let tokens: Vec<&str> = line_str.split_ascii_whitespace().collect();
        if tokens.len() < 6 {
            anyhow::bail!("{file}:{} malformed index line (too few tokens)", lineno + 1);
        }
        match tokens[1].chars().next().and_then(Pos::from_char) {
            Some(found) if found == pos => {}
            Some(found) => anyhow::bail!(
                "{file}:{} pos field {found} does not match {pos} index",
                lineno + 1
            ),
            None => anyhow::bail!("{file}:{} invalid pos field {:?}", lineno + 1, tokens[1]),
        }

        lemmas.insert((pos, normalize(tokens[0])));
        count += 1;
    }
    Ok(count)
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
