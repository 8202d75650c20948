// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn-specific code lives in this layer — model, training,
// and checkpoint-backed inference. The decode loop itself
// (generator.rs) is framework-free and scores contexts through
// the NextTokenScorer trait from Layer 3.
//
//   model.rs     — embedding → single-layer LSTM → linear head,
//                  final-timestep next-token predictor
//
//   trainer.rs   — mini-batch Adam + cross-entropy loop over
//                  shuffled windows, one checkpoint per run
//
//   generator.rs — autoregressive decoding: greedy arg-max and
//                  temperature/top-k sampling, fail-soft on
//                  scoring errors
//
//   inference.rs — InferenceContext: checkpoint + rebuilt
//                  vocabulary, vocabulary-drift detection,
//                  implements NextTokenScorer
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Word-level LSTM language model architecture
pub mod model;

/// Training loop with checkpointing and metrics
pub mod trainer;

/// Greedy and temperature/top-k decoding
pub mod generator;

/// Checkpoint-backed inference context
pub mod inference;
