//! Shared vocabulary for the answer-list pipeline and its oracles.
//!
//! The pipeline never talks to a tagger, lemmatizer, dictionary, or
//! gazetteer directly. It goes through the narrow traits defined here
//! ([`Tagger`], [`Lemmatizer`], [`Vocabulary`], [`PlaceNames`]) so any
//! backing implementation can be swapped in: a WordNet loader, a
//! precomputed table, or a hand-built fake in a test.
//!
//! ```rust
//! use answerlist_types::{Pos, Tag};
//!
//! assert_eq!(Pos::ALL[0], Pos::Noun);
//! assert!(Tag::from_penn("NNPS").is_proper_noun());
//! assert_eq!(Pos::from_char('s'), Some(Pos::Adj));
//! ```

use std::fmt;

/// Grammatical role used when asking a lemmatizer for a canonical form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Resolution order: noun, verb, adjective, adverb.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character (`n`, `v`, `a`/`s`, `r`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the WordNet POS character.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// Coarse part-of-speech tag for a single token, following Penn Treebank names.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    /// `NN`
    Noun,
    /// `NNS`
    NounPlural,
    /// `NNP`
    ProperNoun,
    /// `NNPS`
    ProperNounPlural,
    /// `VB`, `VBD`, `VBG`, `VBN`, `VBP`, `VBZ`
    Verb,
    /// `JJ`, `JJR`, `JJS`
    Adjective,
    /// `RB`, `RBR`, `RBS`
    Adverb,
    Other,
}

impl Tag {
    /// Map a Penn Treebank tag string onto a [`Tag`]. Unknown tags become [`Tag::Other`].
    pub fn from_penn(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NN" => Tag::Noun,
            "NNS" => Tag::NounPlural,
            "NNP" => Tag::ProperNoun,
            "NNPS" => Tag::ProperNounPlural,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Tag::Verb,
            "JJ" | "JJR" | "JJS" => Tag::Adjective,
            "RB" | "RBR" | "RBS" => Tag::Adverb,
            _ => Tag::Other,
        }
    }

    pub fn is_proper_noun(self) -> bool {
        matches!(self, Tag::ProperNoun | Tag::ProperNounPlural)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tag::Noun => "NN",
            Tag::NounPlural => "NNS",
            Tag::ProperNoun => "NNP",
            Tag::ProperNounPlural => "NNPS",
            Tag::Verb => "VB",
            Tag::Adjective => "JJ",
            Tag::Adverb => "RB",
            Tag::Other => "X",
        })
    }
}

/// A token with the canonical form chosen for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaCandidate {
    /// Lowercased surface form.
    pub token: String,
    pub lemma: String,
    /// Role whose lemmatization produced `lemma`.
    pub pos: Pos,
    /// Length of `lemma` in characters.
    pub len: usize,
}

/// Tags a single token in isolation.
pub trait Tagger {
    fn tag(&self, token: &str) -> Tag;

    fn is_proper_noun(&self, token: &str) -> bool {
        self.tag(token).is_proper_noun()
    }
}

/// Produces the canonical form of a word under one grammatical role.
///
/// Implementations return the word itself when the role yields no lemma.
pub trait Lemmatizer {
    fn lemmatize(&self, word: &str, pos: Pos) -> String;
}

/// Reference vocabulary of genuine dictionary words. Lookups are case-insensitive.
pub trait Vocabulary {
    fn contains(&self, word: &str) -> bool;
}

/// Membership test against known country and city names. Case-insensitive.
pub trait PlaceNames {
    fn is_place_name(&self, word: &str) -> bool;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, token: &str) -> Tag {
        (**self).tag(token)
    }
}

impl<T: Lemmatizer + ?Sized> Lemmatizer for &T {
    fn lemmatize(&self, word: &str, pos: Pos) -> String {
        (**self).lemmatize(word, pos)
    }
}

impl<T: Vocabulary + ?Sized> Vocabulary for &T {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<T: PlaceNames + ?Sized> PlaceNames for &T {
    fn is_place_name(&self, word: &str) -> bool {
        (**self).is_place_name(word)
    }
}
