// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The generation loop never talks to Burn directly — it scores
// contexts through the NextTokenScorer trait. This keeps the
// decode logic testable with a stub model (no tensors needed)
// and lets the application layer stay framework-free.
//
// Implementations:
//   - InferenceContext (ml/inference.rs) → real LSTM forward pass
//   - test stubs in ml/generator.rs      → fixed or scripted logits
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use thiserror::Error;

/// A failure while scoring one context window.
///
/// Scoring failures are non-fatal to generation: the decode loop
/// stops and returns the partial sequence produced so far.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// The underlying numeric evaluation failed (malformed state,
    /// non-finite tensors, data conversion errors).
    #[error("scoring failed: {0}")]
    Numeric(String),
}

/// Anything that can score the next token for a fixed-length context.
///
/// The model is consumed as a pure stateless scorer: one call per
/// produced token, parameters read-only throughout.
pub trait NextTokenScorer {
    /// Logits over the vocabulary for the token following `context`.
    /// `context` always has exactly the configured window length.
    fn score(&self, context: &[usize]) -> Result<Vec<f32>, ScoreError>;

    /// Size of the id space the scorer produces logits over.
    fn vocab_size(&self) -> usize;
}
