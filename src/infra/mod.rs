// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs — one checkpoint per training run: model
//                   parameters (full-precision MessagePack
//                   record) plus the vocab_size metadata and
//                   the TrainConfig sidecar, all written
//                   atomically
//
//   metrics.rs    — per-epoch training loss appended to a CSV
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
