// ============================================================
// Layer 3 — Label Maps
// ============================================================
// Maps each corpus' textual labels to the integer class ids the
// training pipeline expects.
//
//   mnli:   contradiction → 0, neutral → 1, entailment → 2
//   scitail: neutral → 0, entails → 1
//
// A LabelMaps value is built once at startup (the built-in
// table, optionally overridden from JSON by infra::label_store)
// and handed to every loader by reference.
//
// Reference: Rust Book §8 (HashMap)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered label vocabulary; a label's id is its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMap {
    pub labels: Vec<String>,
}

impl LabelMap {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Class id of `label`, ignoring surrounding whitespace.
    pub fn id_of(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.labels.iter().position(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Label vocabularies keyed by dataset name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMaps {
    maps: BTreeMap<String, LabelMap>,
}

impl LabelMaps {
    pub fn get(&self, dataset: &str) -> Option<&LabelMap> {
        self.maps.get(dataset)
    }

    /// Replace or add entries from `other`.
    pub fn merge(&mut self, other: LabelMaps) {
        self.maps.extend(other.maps);
    }

    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

impl Default for LabelMaps {
    /// The vocabularies of every corpus the catalog knows about.
    fn default() -> Self {
        let mut maps = BTreeMap::new();
        let nli = LabelMap::new(["contradiction", "neutral", "entailment"]);
        maps.insert("mnli".to_string(), nli.clone());
        maps.insert("snli".to_string(), nli.clone());
        maps.insert("mednli".to_string(), nli);
        maps.insert("scitail".to_string(), LabelMap::new(["neutral", "entails"]));
        maps.insert("qnli".to_string(), LabelMap::new(["not_entailment", "entailment"]));
        maps.insert("rte".to_string(), LabelMap::new(["not_entailment", "entailment"]));
        maps.insert("rqe".to_string(), LabelMap::new(["false", "true"]));
        maps.insert("mediqa".to_string(), LabelMap::new(["0", "1"]));
        Self { maps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_of_trims_and_looks_up() {
        let maps = LabelMaps::default();
        let mnli = maps.get("mnli").unwrap();
        assert_eq!(mnli.id_of("entailment\n"), Some(2));
        assert_eq!(mnli.id_of("contradiction"), Some(0));
        assert_eq!(mnli.id_of("-"), None);
    }

    #[test]
    fn test_merge_overrides_single_entry() {
        let mut maps = LabelMaps::default();
        let overrides = LabelMaps {
            maps: BTreeMap::from([(
                "scitail".to_string(),
                LabelMap::new(["entails", "neutral"]),
            )]),
        };
        maps.merge(overrides);
        assert_eq!(maps.get("scitail").unwrap().id_of("entails"), Some(0));
        assert!(maps.get("mnli").is_some());
    }
}
