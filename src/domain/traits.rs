// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The orchestrator only ever sees a RecordSource. Whether the
// rows come from a GLUE TSV, a MedNLI JSON-lines file or an
// interchange export is the loader's business.
//
// Implementations (data::loader):
//   - TsvSource   → GLUE / SNLI / SciTail tab-separated files
//   - MedNliSource → MedNLI JSON-lines
//   - JsonlSource → records already in the canonical shape
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::{label_map::LabelMaps, record::Record};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the ordered records of one split.
pub trait RecordSource {
    /// Load every record, mapping labels through `labels`.
    fn load(&self, labels: &LabelMaps) -> Result<Vec<Record>>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}
