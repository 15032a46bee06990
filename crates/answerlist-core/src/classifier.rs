use answerlist_types::{Tagger, Vocabulary};

/// Proper-noun and dictionary-membership predicates over external oracles.
#[derive(Clone, Copy)]
pub struct LexicalClassifier<'a> {
    tagger: &'a dyn Tagger,
    vocabulary: &'a dyn Vocabulary,
}

impl<'a> LexicalClassifier<'a> {
    pub fn new(tagger: &'a dyn Tagger, vocabulary: &'a dyn Vocabulary) -> Self {
        Self { tagger, vocabulary }
    }

    /// Tags the raw token in isolation; case is significant.
    pub fn is_proper_noun(&self, token: &str) -> bool {
        self.tagger.is_proper_noun(token)
    }

    pub fn is_known_word(&self, lemma: &str) -> bool {
        self.vocabulary.contains(&lemma.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::CaseTagger;
    use crate::vocabulary::WordList;

    #[test]
    fn delegates_to_oracles() {
        let vocab: WordList = ["apple", "bank"].into_iter().collect();
        let classifier = LexicalClassifier::new(&CaseTagger, &vocab);
        assert!(classifier.is_proper_noun("France"));
        assert!(!classifier.is_proper_noun("france"));
        assert!(classifier.is_known_word("Apple"));
        assert!(!classifier.is_known_word("apples"));
    }
}
