// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns shared by the use case:
//
//   label_store.rs — Builds the run's LabelMaps, optionally
//                    overriding entries from a JSON file.
//
//   layout.rs      — Output directory layout: canonical TSV
//                    paths, ground-truth CSV paths, and the
//                    saved run configuration.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Label map construction and overrides
pub mod label_store;

/// Output paths and directory creation
pub mod layout;
