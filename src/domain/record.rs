// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One training or evaluation example, as produced by a loader.
//
// Every corpus is reduced to the same handful of fields:
//   uid        - unique id within a dataset
//   ruid       - relation id grouping hypotheses (multi-hypothesis only)
//   label      - class id, class name or regression score
//   premise    - first text (or the only text)
//   hypothesis - second text, or an ordered list of candidates
//   extras     - named scalar features such as score / rank
//
// Example (MEDIQA answer re-ranking):
//   uid:        "Q12____A3"
//   label:      1
//   premise:    "What are the symptoms of gout?"
//   hypothesis: "Gout causes sudden, severe pain..."
//   extras:     { score: 4.0, rank: 2 }
//
// Reference: Rust Book §5 (Structs), §6 (Enums)
//            serde documentation (untagged enums)

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Rendered in place of a label for inference-only rows.
/// Negative so it never collides with a class id or an STS score.
pub const UNLABELED: &str = "-1";

/// A scalar value stored in a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            // Whole floats keep one decimal: 3.0 stays "3.0", not "3"
            FieldValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<usize> for FieldValue {
    fn from(v: usize) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

/// The second text of a pair, or the candidate list of a
/// multi-hypothesis record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hypothesis {
    Single(String),
    Multi(Vec<String>),
}

/// Names of the fixed record fields, used by the sanitizer and
/// by the required-field tables of each DataFormat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Uid,
    Ruid,
    Label,
    Premise,
    Hypothesis,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Uid => "uid",
            Field::Ruid => "ruid",
            Field::Label => "label",
            Field::Premise => "premise",
            Field::Hypothesis => "hypothesis",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One example entry. Loaders build these once; afterwards they
/// are only regrouped, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruid: Option<String>,

    /// `None` marks an inference-only row (written as [`UNLABELED`])
    #[serde(default)]
    pub label: Option<FieldValue>,

    pub premise: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<Hypothesis>,

    /// Extra scalar features, looked up by name at write time
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Single-text record (PremiseOnly / Sequence).
    pub fn premise_only(
        uid:     impl Into<String>,
        label:   Option<FieldValue>,
        premise: impl Into<String>,
    ) -> Self {
        Self {
            uid:        uid.into(),
            ruid:       None,
            label,
            premise:    premise.into(),
            hypothesis: None,
            extras:     BTreeMap::new(),
        }
    }

    /// Sentence-pair record (PremiseAndOneHypothesis).
    pub fn pair(
        uid:        impl Into<String>,
        label:      Option<FieldValue>,
        premise:    impl Into<String>,
        hypothesis: impl Into<String>,
    ) -> Self {
        Self {
            hypothesis: Some(Hypothesis::Single(hypothesis.into())),
            ..Self::premise_only(uid, label, premise)
        }
    }

    /// Candidate-list record (PremiseAndMultiHypothesis).
    pub fn multi(
        uid:        impl Into<String>,
        ruid:       impl Into<String>,
        label:      Option<FieldValue>,
        premise:    impl Into<String>,
        hypotheses: Vec<String>,
    ) -> Self {
        Self {
            ruid:       Some(ruid.into()),
            hypothesis: Some(Hypothesis::Multi(hypotheses)),
            ..Self::premise_only(uid, label, premise)
        }
    }

    /// The label as written to disk, with the sentinel for unlabeled rows.
    pub fn label_text(&self) -> String {
        match &self.label {
            Some(v) => v.to_string(),
            None => UNLABELED.to_string(),
        }
    }

    pub fn is_unlabeled(&self) -> bool {
        self.label.is_none()
    }

    /// The single hypothesis text, if this record carries one.
    pub fn single_hypothesis(&self) -> Option<&str> {
        match &self.hypothesis {
            Some(Hypothesis::Single(h)) => Some(h),
            _ => None,
        }
    }
}
