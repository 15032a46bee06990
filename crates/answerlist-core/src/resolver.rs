//! Picks one canonical lemma for a raw token.
//!
//! The token is lemmatized under every role in [`Pos::ALL`] and the shortest
//! result wins; ties go to the earlier role.

use answerlist_types::{LemmaCandidate, Lemmatizer, Pos};

use crate::error::TokenAnomaly;

/// Shortest candidate by character count, earliest on ties. Empty strings are ignored.
pub fn select_lemma<I, S>(candidates: I) -> Option<(Pos, S)>
where
    I: IntoIterator<Item = (Pos, S)>,
    S: AsRef<str>,
{
    let mut best: Option<(Pos, S, usize)> = None;
    for (pos, form) in candidates {
        let len = form.as_ref().chars().count();
        if len == 0 {
            continue;
        }
        if best.as_ref().is_none_or(|(_, _, best_len)| len < *best_len) {
            best = Some((pos, form, len));
        }
    }
    best.map(|(pos, form, _)| (pos, form))
}

#[derive(Clone, Copy)]
pub struct LemmaResolver<'a> {
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> LemmaResolver<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Resolve a raw token. Only blank tokens fail.
    pub fn resolve(&self, token: &str) -> Result<LemmaCandidate, TokenAnomaly> {
        let lowered = token.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(TokenAnomaly::Empty);
        }

        let forms = Pos::ALL.map(|pos| (pos, self.lemmatizer.lemmatize(&lowered, pos)));
        let (pos, lemma) = select_lemma(forms).unwrap_or((Pos::Noun, lowered.clone()));
        let len = lemma.chars().count();
        Ok(LemmaCandidate {
            token: lowered,
            lemma,
            pos,
            len,
        })
    }
}
