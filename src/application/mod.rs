// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to produce a full set of
// canonical and ground-truth files.
//
// Rules for this layer:
//   - No parsing or row formatting here (that's Layer 4)
//   - No CLI types here (that's Layer 1)
//   - Only workflow coordination and dataset policy
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Which datasets exist, where they live, how they are resplit
pub mod catalog;

// The conversion workflow
pub mod prepare_use_case;
