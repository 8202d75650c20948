// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load corpus text        (Layer 4 - data)
//   Step 2: Clean the text          (Layer 4 - data)
//   Step 3: Build the vocabulary    (Layer 3 - domain)
//   Step 4: Encode the token stream (Layer 3 - domain)
//   Step 5: Window the stream       (Layer 4 - data)
//   Step 6: Build the dataset       (Layer 4 - data)
//   Step 7: Save config             (Layer 6 - infra)
//   Step 8: Run the training loop   (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::WindowDataset,
    loader::CorpusLoader,
    preprocessor::Preprocessor,
    windower::windows,
};
use crate::domain::vocab::Vocabulary;
use crate::infra::{checkpoint::CheckpointStore, metrics::MetricsLogger};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so it can be
// saved next to the checkpoint and reloaded for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_path:    String,
    pub checkpoint_dir: String,
    pub window_length:  usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub embed_size:     usize,
    pub hidden_size:    usize,
    pub min_vocab_size: usize,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path:    "data/corpus".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            window_length:  10,
            batch_size:     32,
            epochs:         5,
            lr:             1e-3,
            embed_size:     128,
            hidden_size:    256,
            min_vocab_size: 1000,
            seed:           42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load corpus text ─────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", cfg.corpus_path);
        let raw = CorpusLoader::new(&cfg.corpus_path).load()?;

        // ── Step 2: Clean / normalise text ────────────────────────────────────
        let cleaned = Preprocessor::new().clean(&raw);

        // ── Step 3: Build the vocabulary ──────────────────────────────────────
        let vocab = Vocabulary::build(&cleaned);
        if vocab.is_empty() {
            bail!(
                "corpus at '{}' produced an empty vocabulary — nothing to train on",
                cfg.corpus_path
            );
        }
        tracing::info!("Vocabulary built: {} distinct tokens", vocab.token_count());

        // ── Step 4: Encode the token stream ───────────────────────────────────
        let tokens = vocab.encode(&cleaned);

        // ── Step 5: Slide the training window over the stream ─────────────────
        let wins = windows(&tokens, cfg.window_length);
        if wins.is_empty() {
            bail!(
                "corpus too short: {} tokens cannot fill a window of length {} \
                 plus a target",
                tokens.len(),
                cfg.window_length
            );
        }
        tracing::info!("Created {} training windows", wins.len());

        // ── Step 6: Build the Burn dataset ────────────────────────────────────
        let dataset = WindowDataset::new(wins);

        // ── Step 7: Save config for inference ─────────────────────────────────
        // The generate command needs the architecture to rebuild the model
        let ckpt_store = CheckpointStore::new(&cfg.checkpoint_dir);
        ckpt_store.save_config(cfg)?;

        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 8: Run the training loop (Layer 5) ───────────────────────────
        run_training(cfg, dataset, vocab.size(), &ckpt_store, &metrics)?;

        Ok(())
    }
}
