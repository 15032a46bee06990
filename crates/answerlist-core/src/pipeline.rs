//! Filtering pipeline: raw pool in, ranked length-bucketed answers out.
//!
//! Per token, in pool order (ascending bucket length, then source order):
//! 1. reject proper nouns (tagged on the raw token);
//! 2. resolve the lemma;
//! 3. reject place names and words outside the reference vocabulary;
//! 4. reject lemmas whose length is outside `[min_len, max_len]`;
//! 5. reject lemmas already accepted anywhere in this run;
//! 6. reject lemmas below the frequency threshold;
//! 7. accept into the bucket keyed by the lemma's own length.
//!
//! Only tokens whose original length falls inside the intake window are
//! considered. Buckets are then stably sorted by descending frequency.

use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use answerlist_types::PlaceNames;
use tracing::{debug, info, warn};

use crate::answer::AnswerSet;
use crate::classifier::LexicalClassifier;
use crate::error::{PipelineError, Result, TokenAnomaly};
use crate::frequency::FrequencyTable;
use crate::pool::RawWordPool;
use crate::resolver::LemmaResolver;
use crate::supplement::Supplement;

pub const DEFAULT_MIN_LEN: usize = 5;
pub const DEFAULT_MAX_LEN: usize = 7;
pub const DEFAULT_FREQ_THRESHOLD: u64 = 800;
/// Raw token lengths considered, independent of the output window.
pub const INTAKE_WINDOW: RangeInclusive<usize> = 5..=10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub min_len: usize,
    pub max_len: usize,
    pub freq_threshold: u64,
    pub intake: RangeInclusive<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            freq_threshold: DEFAULT_FREQ_THRESHOLD,
            intake: INTAKE_WINDOW,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_len == 0 {
            return Err(PipelineError::InvalidConfig("min_len must be at least 1".into()));
        }
        if self.min_len > self.max_len {
            return Err(PipelineError::InvalidConfig(format!(
                "min_len {} exceeds max_len {}",
                self.min_len, self.max_len
            )));
        }
        if self.intake.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "intake window {:?} is empty",
                self.intake
            )));
        }
        Ok(())
    }

    pub fn output_window(&self) -> RangeInclusive<usize> {
        self.min_len..=self.max_len
    }
}

/// An accepted lemma with the frequency it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub lemma: String,
    pub frequency: u64,
}

/// Why a token did not make it into the answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ProperNoun,
    PlaceName,
    UnknownWord,
    OutOfWindow,
    /// The lemma's bucket is supplied by a supplementary list.
    Superseded,
    Duplicate,
    BelowThreshold,
}

enum Skip {
    Rejected(Rejection),
    Anomaly(TokenAnomaly),
}

impl From<Rejection> for Skip {
    fn from(r: Rejection) -> Self {
        Skip::Rejected(r)
    }
}

/// Per-run counters, one per token outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub considered: usize,
    pub accepted: usize,
    pub proper_noun: usize,
    pub place_name: usize,
    pub unknown_word: usize,
    pub out_of_window: usize,
    pub superseded: usize,
    pub duplicate: usize,
    pub below_threshold: usize,
    pub anomalies: usize,
    pub skipped_outside_intake: usize,
}

impl BuildReport {
    fn record(&mut self, rejection: Rejection) {
        let slot = match rejection {
            Rejection::ProperNoun => &mut self.proper_noun,
            Rejection::PlaceName => &mut self.place_name,
            Rejection::UnknownWord => &mut self.unknown_word,
            Rejection::OutOfWindow => &mut self.out_of_window,
            Rejection::Superseded => &mut self.superseded,
            Rejection::Duplicate => &mut self.duplicate,
            Rejection::BelowThreshold => &mut self.below_threshold,
        };
        *slot += 1;
    }

    /// Sum of all rejection counters.
    pub fn rejected(&self) -> usize {
        self.proper_noun
            + self.place_name
            + self.unknown_word
            + self.out_of_window
            + self.superseded
            + self.duplicate
            + self.below_threshold
    }
}

/// The orchestrator. Holds borrowed oracles only; all per-run state lives
/// inside a single [`Pipeline::build_answer_set`] call.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
    classifier: LexicalClassifier<'a>,
    resolver: LemmaResolver<'a>,
    places: &'a dyn PlaceNames,
    supplement: Option<&'a Supplement>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        classifier: LexicalClassifier<'a>,
        resolver: LemmaResolver<'a>,
        places: &'a dyn PlaceNames,
    ) -> Self {
        Self {
            classifier,
            resolver,
            places,
            supplement: None,
        }
    }

    /// Fill the `min_len` bucket from a pre-vetted list instead of the pipeline.
    pub fn with_supplement(mut self, supplement: &'a Supplement) -> Self {
        self.supplement = Some(supplement);
        self
    }

    pub fn build_answer_set(
        &self,
        pool: &RawWordPool,
        freq: &FrequencyTable,
        config: &PipelineConfig,
    ) -> Result<AnswerSet> {
        self.build_with_report(pool, freq, config)
            .map(|(answers, _)| answers)
    }

    pub fn build_with_report(
        &self,
        pool: &RawWordPool,
        freq: &FrequencyTable,
        config: &PipelineConfig,
    ) -> Result<(AnswerSet, BuildReport)> {
        config.validate()?;
        if let Some(supplement) = self.supplement
            && supplement.target_len() != config.min_len
        {
            return Err(PipelineError::InvalidConfig(format!(
                "supplementary list has length {}, expected min_len {}",
                supplement.target_len(),
                config.min_len
            )));
        }

        let window = config.output_window();
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries: BTreeMap<usize, Vec<AnswerEntry>> = BTreeMap::new();
        let mut report = BuildReport::default();

        for (len, tokens) in pool.buckets() {
            if !config.intake.contains(&len) {
                report.skipped_outside_intake += tokens.len();
                continue;
            }
            if window.contains(&len) && !tokens.is_empty() {
                entries.entry(len).or_default();
            }

            for token in tokens {
                report.considered += 1;
                match self.evaluate(token, &seen, freq, config) {
                    Ok((lemma_len, entry)) => {
                        debug!("accepted {token:?} as {:?} ({})", entry.lemma, entry.frequency);
                        seen.insert(entry.lemma.clone());
                        entries.entry(lemma_len).or_default().push(entry);
                        report.accepted += 1;
                    }
                    Err(Skip::Rejected(rejection)) => {
                        debug!("rejected {token:?}: {rejection:?}");
                        report.record(rejection);
                    }
                    Err(Skip::Anomaly(anomaly)) => {
                        warn!("skipping token {token:?} in bucket {len}: {anomaly}");
                        report.anomalies += 1;
                    }
                }
            }
        }

        let mut buckets: BTreeMap<usize, Vec<String>> = entries
            .into_iter()
            .map(|(len, mut list)| {
                list.sort_by(|a, b| b.frequency.cmp(&a.frequency));
                (len, list.into_iter().map(|e| e.lemma).collect())
            })
            .collect();
        if let Some(supplement) = self.supplement {
            buckets.insert(supplement.target_len(), supplement.words().to_vec());
        }

        for (len, words) in &buckets {
            info!("bucket {len}: {} answers", words.len());
        }
        info!(
            "considered {} tokens: {} accepted, {} rejected, {} anomalies, {} outside intake",
            report.considered,
            report.accepted,
            report.rejected(),
            report.anomalies,
            report.skipped_outside_intake
        );

        Ok((AnswerSet::from_buckets(buckets), report))
    }

    fn evaluate(
        &self,
        token: &str,
        seen: &HashSet<String>,
        freq: &FrequencyTable,
        config: &PipelineConfig,
    ) -> std::result::Result<(usize, AnswerEntry), Skip> {
        if token.trim().is_empty() {
            return Err(Skip::Anomaly(TokenAnomaly::Empty));
        }
        if self.classifier.is_proper_noun(token) {
            return Err(Rejection::ProperNoun.into());
        }

        let candidate = self.resolver.resolve(token).map_err(Skip::Anomaly)?;
        if self.places.is_place_name(&candidate.lemma) {
            return Err(Rejection::PlaceName.into());
        }
        if !self.classifier.is_known_word(&candidate.lemma) {
            return Err(Rejection::UnknownWord.into());
        }
        if !config.output_window().contains(&candidate.len) {
            return Err(Rejection::OutOfWindow.into());
        }
        if self
            .supplement
            .is_some_and(|s| s.target_len() == candidate.len)
        {
            return Err(Rejection::Superseded.into());
        }
        if seen.contains(&candidate.lemma) {
            return Err(Rejection::Duplicate.into());
        }

        let frequency = freq.get(&candidate.lemma);
        if frequency < config.freq_threshold {
            return Err(Rejection::BelowThreshold.into());
        }

        Ok((
            candidate.len,
            AnswerEntry {
                lemma: candidate.lemma,
                frequency,
            },
        ))
    }
}
