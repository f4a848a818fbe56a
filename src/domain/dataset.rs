// ============================================================
// Layer 3 — Dataset Domain Type
// ============================================================
// A named, ordered collection of records for one split,
// tagged with the corpus it came from.
//
//   name:       "mednli"
//   split:      Split::Dev
//   provenance: "MedNLI"
//
// Reference: Rust Book §8 (Vectors, HashSet)

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{PrepError, PrepResult},
    record::Record,
};

/// A named partition. Most corpora only use train/dev/test; the
/// custom variant covers names like "matched_dev" or k-way folds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Train,
    Dev,
    Test,
    Named(String),
}

impl Split {
    pub fn as_str(&self) -> &str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
            Split::Named(name) => name,
        }
    }

    /// Split name for fold `index` of a k-way export, e.g. "2_train".
    pub fn fold(index: usize, inner: &Split) -> Split {
        Split::Named(format!("{index}_{}", inner.as_str()))
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub name:       String,
    pub split:      Split,
    pub provenance: String,
    pub records:    Vec<Record>,
}

impl Dataset {
    pub fn new(
        name:       impl Into<String>,
        split:      Split,
        provenance: impl Into<String>,
        records:    Vec<Record>,
    ) -> Self {
        Self {
            name: name.into(),
            split,
            provenance: provenance.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File stem used for canonical output: "<name>_<split>".
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.name, self.split)
    }

    /// Fails on the first uid seen twice.
    pub fn ensure_unique_uids(&self) -> PrepResult<()> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for r in &self.records {
            if !seen.insert(r.uid.as_str()) {
                return Err(PrepError::DuplicateUid {
                    dataset: self.file_stem(),
                    uid:     r.uid.clone(),
                });
            }
        }
        Ok(())
    }
}
