// ============================================================
// Layer 6 — Checkpoint Store
// ============================================================
// Persists one checkpoint per training run:
//
//   checkpoints/
//     model.mpk          ← model parameters (named MessagePack)
//     checkpoint.json    ← the vocab_size the model was trained with
//     train_config.json  ← hyperparameters, so inference can rebuild
//                          the exact architecture
//
// Every file is written to a temporary name and renamed into
// place — a crash mid-write never leaves a truncated checkpoint
// behind.
//
// Parameters are recorded at full precision so a reloaded model
// reproduces the saved model's outputs exactly. Loading restores
// them into an already-constructed model after the stored
// vocab_size has been checked against the target architecture.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder, RecorderError},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use thiserror::Error;

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::WordLstm;

// The named-MessagePack recorder appends ".mpk" to the stem it is given
const WEIGHTS_STEM: &str = "model";
const WEIGHTS_TMP_STEM: &str = "model_tmp";
const WEIGHTS_EXT: &str = "mpk";
const META_FILE: &str = "checkpoint.json";
const CONFIG_FILE: &str = "train_config.json";

/// Checkpoint failures callers can react to individually.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Nothing has been trained yet — the model is unavailable
    #[error("no checkpoint found in '{0}' — run `train` first")]
    Missing(PathBuf),

    /// The checkpoint was trained with a different architecture than
    /// the model it is being loaded into
    #[error(
        "checkpoint '{path}' was trained with vocab_size {stored} \
         but the model expects {expected}"
    )]
    VocabSizeMismatch {
        path:     PathBuf,
        stored:   usize,
        expected: usize,
    },

    /// The stored record cannot be deserialised into the model
    #[error("checkpoint '{path}' does not match the model architecture: {source}")]
    ShapeMismatch {
        path:   PathBuf,
        source: RecorderError,
    },

    /// Sidecar metadata is unreadable or corrupt
    #[error("cannot read checkpoint metadata: {0}")]
    Metadata(String),
}

/// Everything needed to reload the weights consistently, stored
/// alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CheckpointMeta {
    vocab_size: usize,
}

/// Saves and restores model parameters plus the vocab_size they were
/// trained with. All files live in the configured directory.
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Write model parameters and the vocab_size as one logical
    /// checkpoint, atomically from the caller's perspective.
    pub fn save<B: Backend>(&self, model: &WordLstm<B>, vocab_size: usize) -> Result<()> {
        // ── Weights: record to a temp stem, then rename ───────────────────────
        let tmp_stem = self.dir.join(WEIGHTS_TMP_STEM);
        NamedMpkFileRecorder::<FullPrecisionSettings>::new()
            .record(model.clone().into_record(), tmp_stem.clone())
            .with_context(|| {
                format!("Failed to save checkpoint weights to '{}'", tmp_stem.display())
            })?;
        fs::rename(
            self.dir.join(format!("{WEIGHTS_TMP_STEM}.{WEIGHTS_EXT}")),
            self.dir.join(format!("{WEIGHTS_STEM}.{WEIGHTS_EXT}")),
        )
        .context("Failed to finalise checkpoint weights")?;

        // ── Metadata sidecar, same temp-and-rename discipline ─────────────────
        let meta     = CheckpointMeta { vocab_size };
        let tmp_meta = self.dir.join("checkpoint_tmp.json");
        fs::write(&tmp_meta, serde_json::to_string_pretty(&meta)?)
            .with_context(|| format!("Cannot write metadata to '{}'", tmp_meta.display()))?;
        fs::rename(&tmp_meta, self.dir.join(META_FILE))
            .context("Failed to finalise checkpoint metadata")?;

        tracing::info!(
            "Checkpoint saved to '{}' (vocab_size={})",
            self.dir.display(),
            vocab_size,
        );
        Ok(())
    }

    /// The vocab_size recorded at training time.
    pub fn vocab_size(&self) -> Result<usize, CheckpointError> {
        let path = self.dir.join(META_FILE);
        if !path.exists() {
            return Err(CheckpointError::Missing(self.dir.clone()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| CheckpointError::Metadata(e.to_string()))?;
        let meta: CheckpointMeta = serde_json::from_str(&json)
            .map_err(|e| CheckpointError::Metadata(e.to_string()))?;
        Ok(meta.vocab_size)
    }

    /// Restore parameters into a compatibly shaped model and return it
    /// together with the stored vocab_size, so callers can detect
    /// vocabulary drift against a freshly rebuilt vocabulary.
    pub fn load<B: Backend>(
        &self,
        model:  WordLstm<B>,
        device: &B::Device,
    ) -> Result<(WordLstm<B>, usize), CheckpointError> {
        let vocab_size = self.vocab_size()?;

        let stem = self.dir.join(WEIGHTS_STEM);
        if !self.dir.join(format!("{WEIGHTS_STEM}.{WEIGHTS_EXT}")).exists() {
            return Err(CheckpointError::Missing(self.dir.clone()));
        }

        // The record format restores whatever tensors it finds, so the
        // architecture must be checked explicitly — a checkpoint from a
        // differently sized model is rejected, never partially adopted.
        if vocab_size != model.vocab_size() {
            return Err(CheckpointError::VocabSizeMismatch {
                path:     stem,
                stored:   vocab_size,
                expected: model.vocab_size(),
            });
        }

        let record = NamedMpkFileRecorder::<FullPrecisionSettings>::new()
            .load(stem.clone(), device)
            .map_err(|source| CheckpointError::ShapeMismatch { path: stem, source })?;

        Ok((model.load_record(record), vocab_size))
    }

    /// Persist the training configuration so inference can rebuild the
    /// exact model architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let tmp  = self.dir.join("train_config_tmp.json");
        let path = self.dir.join(CONFIG_FILE);
        fs::write(&tmp, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", tmp.display()))?;
        fs::rename(&tmp, &path).context("Failed to finalise training config")?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig, CheckpointError> {
        let path = self.dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(CheckpointError::Missing(self.dir.clone()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| CheckpointError::Metadata(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| CheckpointError::Metadata(e.to_string()))
    }
}
