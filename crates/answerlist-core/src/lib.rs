//! Curated answer lists for word-guessing games.
//!
//! Turns a noisy pool of candidate words, grouped by length, into
//! frequency-ranked, globally deduplicated lemma lists. External linguistic
//! resources are reached only through the oracle traits in
//! [`answerlist_types`], so the [`Pipeline`] is a pure function of its
//! inputs.
//!
//! ```rust
//! use answerlist_core::{
//!     CaseTagger, FrequencyTable, Gazetteer, LemmaResolver, LexicalClassifier, Pipeline,
//!     PipelineConfig, RawWordPool, WordList,
//! };
//! use answerlist_types::{Lemmatizer, Pos};
//!
//! struct Plurals;
//! impl Lemmatizer for Plurals {
//!     fn lemmatize(&self, word: &str, pos: Pos) -> String {
//!         match (pos, word.strip_suffix('s')) {
//!             (Pos::Noun, Some(stem)) => stem.to_string(),
//!             _ => word.to_string(),
//!         }
//!     }
//! }
//!
//! # fn main() -> answerlist_core::Result<()> {
//! let pool = RawWordPool::from_json_str(r#"{"5": ["apple", "apples"]}"#)?;
//! let freq = FrequencyTable::from_corpus_str("apple 5000\n")?;
//! let vocabulary: WordList = ["apple"].into_iter().collect();
//! let places = Gazetteer::default();
//!
//! let pipeline = Pipeline::new(
//!     LexicalClassifier::new(&CaseTagger, &vocabulary),
//!     LemmaResolver::new(&Plurals),
//!     &places,
//! );
//! let answers = pipeline.build_answer_set(&pool, &freq, &PipelineConfig::default())?;
//! assert_eq!(answers.bucket(5).unwrap(), ["apple"]);
//! # Ok(()) }
//! ```

pub mod answer;
pub mod classifier;
pub mod error;
pub mod frequency;
pub mod gazetteer;
pub mod pipeline;
pub mod pool;
pub mod resolver;
pub mod supplement;
pub mod tagger;
pub mod vocabulary;

pub use answer::AnswerSet;
pub use classifier::LexicalClassifier;
pub use error::{PipelineError, Result, TokenAnomaly};
pub use frequency::{DEFAULT_CORPUS_URL, FrequencyTable};
pub use gazetteer::Gazetteer;
pub use pipeline::{
    AnswerEntry, BuildReport, DEFAULT_FREQ_THRESHOLD, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN,
    INTAKE_WINDOW, Pipeline, PipelineConfig, Rejection,
};
pub use pool::RawWordPool;
pub use resolver::{LemmaResolver, select_lemma};
pub use supplement::Supplement;
pub use tagger::{CaseTagger, TagTable};
pub use vocabulary::WordList;
