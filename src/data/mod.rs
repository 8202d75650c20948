// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw corpus files and tensor batches.
//
// The pipeline flows in this order:
//
//   corpus .txt files
//       │
//       ▼
//   CorpusLoader      → reads the raw text
//       │
//       ▼
//   Preprocessor      → lowercases, strips punctuation,
//       │               collapses whitespace
//       ▼
//   Vocabulary        → words become integer ids (Layer 3)
//       │
//       ▼
//   windower          → slides a fixed window over the id stream
//       │
//       ▼
//   WindowDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   WindowBatcher     → stacks windows into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads plain-text corpus files from disk
pub mod loader;

/// Cleans and normalises raw corpus text
pub mod preprocessor;

/// Slices the token stream into (context, target) windows
pub mod windower;

/// Implements Burn's Dataset trait for token windows
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
