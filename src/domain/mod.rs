// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types at the heart of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits
//
// This keeps the vocabulary and the scoring abstraction unit
// testable without tensors or a device.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Token ↔ id mapping built from the training corpus
pub mod vocab;

// The NextTokenScorer seam between decoding and the model
pub mod traits;
