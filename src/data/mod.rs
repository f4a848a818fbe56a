// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw benchmark dumps
// to canonical TSV rows and scorer CSVs.
//
// The pipeline flows in this order:
//
//   raw .tsv / .jsonl files
//       │
//       ▼
//   Loader            → parses rows into Records, maps labels
//       │
//       ▼
//   Splitter          → merges, reshuffles, folds, augments
//       │
//       ├──────────────────────────┐
//       ▼                          ▼
//   GroundTruth       → CSV     CanonicalWriter → TSV
//                                  │
//                                  ▼
//                              Sanitizer (per field, per row)
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads corpus files into Records
pub mod loader;

/// Strips tabs and newlines from text fields
pub mod sanitizer;

/// Renders records into the canonical TSV layouts
pub mod writer;

/// Writes the scorer's ground-truth CSVs
pub mod ground_truth;

/// Shuffles, folds and augments record collections
pub mod splitter;
