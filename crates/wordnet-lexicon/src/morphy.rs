//! WordNet-style morphological processing (morphy).
//!
//! Exceptions first, then POS-specific suffix rules, with every guess
//! verified against a caller-provided existence predicate. An exception hit
//! short-circuits rule guessing, as in WordNet's own morphy.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use answerlist_types::Pos;
use tracing::debug;

/// Where a base form originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A verified base form for one POS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MorphyForm {
    pub pos: Pos,
    pub lemma: String,
    pub source: FormSource,
}

/// Exception lists keyed by POS; rules are static.
#[derive(Debug, Default)]
pub struct Morphy {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Load `noun.exc`, `verb.exc`, `adj.exc`, `adv.exc` from a WordNet dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for pos in Pos::ALL {
            let map = load_exc(dir.join(exc_file_name(pos)))?;
            debug!("loaded {} {pos} exceptions", map.len());
            exceptions.insert(pos, map);
        }
        Ok(Self { exceptions })
    }

    /// Build from in-memory `(pos, surface, lemmas)` exception entries.
    pub fn from_exceptions<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Pos, &'a str, &'a [&'a str])>,
    {
        let mut exceptions: HashMap<Pos, HashMap<String, Vec<String>>> = HashMap::new();
        for (pos, surface, lemmas) in entries {
            exceptions
                .entry(pos)
                .or_default()
                .insert(normalize(surface), lemmas.iter().map(|l| normalize(l)).collect());
        }
        Self { exceptions }
    }

    /// Number of exception entries for a POS.
    pub fn exception_count(&self, pos: Pos) -> usize {
        self.exceptions.get(&pos).map_or(0, HashMap::len)
    }

    /// Verified base forms of `surface` under `pos`, in discovery order.
    ///
    /// `lemma_exists` decides which guesses are real lemmas; this type knows
    /// nothing about how the dictionary is stored.
    pub fn forms_for<F>(&self, pos: Pos, surface: &str, lemma_exists: F) -> Vec<MorphyForm>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        let norm_surface = normalize(surface);
        if norm_surface.is_empty() {
            return out;
        }

        if lemma_exists(pos, &norm_surface) {
            push_unique(&mut out, &mut seen, pos, norm_surface.clone(), FormSource::Surface);
        }

        if let Some(exc_map) = self.exceptions.get(&pos)
            && let Some(entries) = exc_map.get(&norm_surface)
        {
            for lemma in entries {
                if lemma_exists(pos, lemma) {
                    push_unique(&mut out, &mut seen, pos, lemma.clone(), FormSource::Exception);
                }
            }
            return out;
        }

        for &(suffix, replacement) in rules_for(pos) {
            for candidate in apply_rule(&norm_surface, suffix, replacement) {
                if lemma_exists(pos, &candidate) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        pos,
                        candidate,
                        FormSource::Rule {
                            suffix,
                            replacement,
                        },
                    );
                }
            }
        }

        out
    }
}

fn exc_file_name(pos: Pos) -> &'static str {
    match pos {
        Pos::Noun => "noun.exc",
        Pos::Verb => "verb.exc",
        Pos::Adj => "adj.exc",
        Pos::Adv => "adv.exc",
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let Some(surface) = parts.next().map(normalize) else {
            continue;
        };
        let lemmas: Vec<String> = parts.map(normalize).collect();
        if !lemmas.is_empty() {
            map.insert(surface, lemmas);
        }
    }
    Ok(map)
}

pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

fn push_unique(
    out: &mut Vec<MorphyForm>,
    seen: &mut HashSet<String>,
    pos: Pos,
    lemma: String,
    source: FormSource,
) {
    if seen.insert(lemma.clone()) {
        out.push(MorphyForm { pos, lemma, source });
    }
}

/// Stem guesses for one rule. Empty replacements also try the stem with a
/// doubled final letter collapsed ("running" -> "runn" -> "run").
fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Vec<String> {
    let Some(stem) = surface.strip_suffix(suffix) else {
        return Vec::new();
    };
    if stem.is_empty() {
        return Vec::new();
    }
    if !replacement.is_empty() {
        return vec![format!("{stem}{replacement}")];
    }

    let mut guesses = vec![stem.to_string()];
    let mut chars = stem.chars();
    if let (Some(last), Some(prev)) = (chars.next_back(), chars.next_back())
        && last == prev
    {
        let mut collapsed = stem.to_string();
        collapsed.pop();
        guesses.push(collapsed);
    }
    guesses
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_exists(targets: &[(&str, Pos)]) -> impl Fn(Pos, &str) -> bool {
        let set: HashSet<(Pos, String)> = targets
            .iter()
            .map(|(lemma, pos)| (*pos, normalize(lemma)))
            .collect();
        move |pos, lemma| set.contains(&(pos, normalize(lemma)))
    }

    #[test]
    fn exceptions_short_circuit_rules() {
        let morph = Morphy::from_exceptions([(Pos::Noun, "children", &["child"][..])]);
        let forms = morph.forms_for(
            Pos::Noun,
            "children",
            fake_exists(&[("child", Pos::Noun), ("childre", Pos::Noun)]),
        );
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].source, FormSource::Exception);
        assert_eq!(forms[0].lemma, "child");
    }

    #[test]
    fn includes_surface_and_rule_hits() {
        let morph = Morphy::default();
        let forms = morph.forms_for(
            Pos::Verb,
            "running",
            fake_exists(&[("running", Pos::Verb), ("run", Pos::Verb)]),
        );
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].source, FormSource::Surface);
        assert_eq!(forms[1].lemma, "run");
        assert!(matches!(forms[1].source, FormSource::Rule { suffix: "ing", .. }));
    }

    #[test]
    fn keeps_genuine_double_letters() {
        let morph = Morphy::default();
        let forms = morph.forms_for(Pos::Verb, "kissed", fake_exists(&[("kiss", Pos::Verb)]));
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].lemma, "kiss");
    }

    #[test]
    fn adverbs_have_no_rules() {
        let morph = Morphy::default();
        let forms = morph.forms_for(Pos::Adv, "faster", fake_exists(&[("fast", Pos::Adv)]));
        assert!(forms.is_empty());
    }

    #[test]
    fn whole_word_suffix_is_not_a_stem() {
        assert!(apply_rule("s", "s", "").is_empty());
        assert_eq!(apply_rule("wolves", "ves", "f"), vec!["wolf".to_string()]);
    }
}
