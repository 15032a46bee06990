//! Country and city names used to keep geographic words out of answer lists.
//!
//! The JSON document has two optional sections, `countries` and `cities`.
//! Each is either an object keyed by record id or a plain array of records;
//! a record carries a primary `name` and an optional `alternatenames` list.
//!
//! ```json
//! {
//!   "countries": { "FR": { "name": "France" } },
//!   "cities": [ { "name": "Paris", "alternatenames": ["Lutece", "Lutetia"] } ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use answerlist_types::PlaceNames;
use serde::Deserialize;
use tracing::info;

use crate::error::{PipelineError, Result};

const RESOURCE: &str = "gazetteer";

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    #[serde(default)]
    alternatenames: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Records {
    Keyed(HashMap<String, PlaceRecord>),
    List(Vec<PlaceRecord>),
}

impl Default for Records {
    fn default() -> Self {
        Records::List(Vec::new())
    }
}

impl Records {
    fn into_names(self) -> HashSet<String> {
        let records: Vec<PlaceRecord> = match self {
            Records::Keyed(map) => map.into_values().collect(),
            Records::List(list) => list,
        };
        records
            .into_iter()
            .flat_map(|r| std::iter::once(r.name).chain(r.alternatenames))
            .filter_map(|name| normalize_name(&name))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct GazetteerFile {
    #[serde(default)]
    countries: Records,
    #[serde(default)]
    cities: Records,
}

/// Lowercase country and city names, alternates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gazetteer {
    countries: HashSet<String>,
    cities: HashSet<String>,
}

impl Gazetteer {
    pub fn new<C, T, S>(countries: C, cities: T) -> Self
    where
        C: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            countries: countries
                .into_iter()
                .filter_map(|s| normalize_name(s.as_ref()))
                .collect(),
            cities: cities
                .into_iter()
                .filter_map(|s| normalize_name(s.as_ref()))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: GazetteerFile =
            serde_json::from_str(json).map_err(|e| PipelineError::unavailable(RESOURCE, e))?;
        Ok(Self::from_file(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let file: GazetteerFile =
            serde_json::from_reader(reader).map_err(|e| PipelineError::unavailable(RESOURCE, e))?;
        Ok(Self::from_file(file))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PipelineError::unavailable(RESOURCE, format!("{}: {e}", path.display())))?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_file(file: GazetteerFile) -> Self {
        let gazetteer = Self {
            countries: file.countries.into_names(),
            cities: file.cities.into_names(),
        };
        info!(
            "gazetteer: {} country names, {} city names",
            gazetteer.countries.len(),
            gazetteer.cities.len()
        );
        gazetteer
    }

    pub fn is_country(&self, word: &str) -> bool {
        self.countries.contains(&word.trim().to_lowercase())
    }

    pub fn is_city(&self, word: &str) -> bool {
        self.cities.contains(&word.trim().to_lowercase())
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

fn normalize_name(name: &str) -> Option<String> {
    let norm = name.trim().to_lowercase();
    (!norm.is_empty()).then_some(norm)
}

impl PlaceNames for Gazetteer {
    fn is_place_name(&self, word: &str) -> bool {
        let key = word.trim().to_lowercase();
        self.countries.contains(&key) || self.cities.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "countries": {
            "FR": { "name": "France" },
            "DE": { "name": "Germany", "alternatenames": ["Deutschland"] }
        },
        "cities": [
            { "name": "Paris", "alternatenames": ["Lutetia", " "] },
            { "name": "Berlin" }
        ]
    }"#;

    #[test]
    fn loads_keyed_and_listed_records() {
        let gaz = Gazetteer::from_json_str(SAMPLE).unwrap();
        assert_eq!(gaz.country_count(), 3);
        assert_eq!(gaz.city_count(), 3);
        assert!(gaz.is_country("germany"));
        assert!(gaz.is_city("Berlin"));
    }

    #[test]
    fn matches_alternate_names_case_insensitively() {
        let gaz = Gazetteer::from_json_str(SAMPLE).unwrap();
        assert!(gaz.is_place_name("DEUTSCHLAND"));
        assert!(gaz.is_place_name("lutetia"));
        assert!(!gaz.is_place_name("apple"));
        assert!(!gaz.is_place_name(""));
    }

    #[test]
    fn sections_are_optional() {
        let gaz = Gazetteer::from_json_str(r#"{"cities": [{"name": "Rome"}]}"#).unwrap();
        assert_eq!(gaz.country_count(), 0);
        assert!(gaz.is_place_name("rome"));
    }

    #[test]
    fn invalid_document_is_unavailable() {
        let err = Gazetteer::from_json_str(r#"{"countries": 3}"#).unwrap_err();
        assert!(matches!(err, PipelineError::ResourceUnavailable { resource: "gazetteer", .. }));
    }
}
