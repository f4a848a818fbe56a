// ============================================================
// Layer 3 — DataFormat
// ============================================================
// The closed set of canonical row shapes. Each variant knows
// which fields a record must carry and which of them are text
// (and therefore need sanitizing before they are written).
//
//   PremiseOnly                uid  label  premise
//   PremiseAndOneHypothesis    uid  label  premise  hypothesis  [extras...]
//   PremiseAndMultiHypothesis  uid  ruid   label    premise     hyp_0 .. hyp_n-1
//   Sequence                   uid  label  premise
//
// Row layout lives in data::writer, which matches on the variant
// exhaustively, so a fifth shape fails to compile until every
// dispatch site handles it.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{errors::PrepError, record::Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFormat {
    PremiseOnly,
    PremiseAndOneHypothesis,
    PremiseAndMultiHypothesis,
    Sequence,
}

impl DataFormat {
    /// Fields a record must expose to be written in this format.
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            DataFormat::PremiseOnly | DataFormat::Sequence => {
                &[Field::Uid, Field::Label, Field::Premise]
            }
            DataFormat::PremiseAndOneHypothesis => {
                &[Field::Uid, Field::Label, Field::Premise, Field::Hypothesis]
            }
            DataFormat::PremiseAndMultiHypothesis => &[
                Field::Uid,
                Field::Ruid,
                Field::Label,
                Field::Premise,
                Field::Hypothesis,
            ],
        }
    }

    /// Whether this format accepts trailing extra-feature columns.
    pub fn supports_extra_features(self) -> bool {
        matches!(self, DataFormat::PremiseAndOneHypothesis)
    }

    /// Wire tag used by the downstream task definitions.
    pub fn tag(self) -> u8 {
        match self {
            DataFormat::PremiseOnly => 1,
            DataFormat::PremiseAndOneHypothesis => 2,
            DataFormat::PremiseAndMultiHypothesis => 3,
            DataFormat::Sequence => 4,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataFormat::PremiseOnly => "PremiseOnly",
            DataFormat::PremiseAndOneHypothesis => "PremiseAndOneHypothesis",
            DataFormat::PremiseAndMultiHypothesis => "PremiseAndMultiHypothesis",
            DataFormat::Sequence => "Sequence",
        };
        f.write_str(name)
    }
}

/// Accepts either the numeric wire tag or the variant name
/// (case-insensitive). Anything else is `UnsupportedFormat`.
impl FromStr for DataFormat {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "premiseonly" => Ok(DataFormat::PremiseOnly),
            "2" | "premiseandonehypothesis" => Ok(DataFormat::PremiseAndOneHypothesis),
            "3" | "premiseandmultihypothesis" => Ok(DataFormat::PremiseAndMultiHypothesis),
            "4" | "sequence" => Ok(DataFormat::Sequence),
            _ => Err(PrepError::UnsupportedFormat(s.to_string())),
        }
    }
}
