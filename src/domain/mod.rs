// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// converter works with.
//
// Rules for this layer:
//   - NO file I/O
//   - NO logging setup or CLI types
//   - Only data definitions, validation and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Record, field values and hypothesis shapes
pub mod record;

// Canonical row shapes and their required fields
pub mod format;

// Named split collections
pub mod dataset;

// Label vocabularies passed into loaders
pub mod label_map;

// Error taxonomy shared by every layer
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
