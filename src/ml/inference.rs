// ============================================================
// Layer 5 — Inference Context
// ============================================================
// The explicit, dependency-injected bundle every generation
// request runs against: a checkpointed model, the vocabulary
// rebuilt from the corpus, and the window length the model was
// trained with.
//
// Lifecycle: built once at process start, immutable while
// serving (concurrent reads are safe — parameters are never
// mutated during inference), and replaced wholly by a fresh
// `load` on reload, never mutated in place.
//
// The model is sized from the checkpoint's recorded vocab_size,
// so loading cannot hit a shape mismatch from vocabulary drift;
// drift against the freshly rebuilt vocabulary is surfaced as a
// retained `VocabDrift` plus a warning, not an error.

use burn::prelude::*;
use thiserror::Error;

use crate::data::preprocessor::Preprocessor;
use crate::domain::{
    traits::{NextTokenScorer, ScoreError},
    vocab::Vocabulary,
};
use crate::infra::checkpoint::{CheckpointError, CheckpointStore};
use crate::ml::generator::{self, DecodeOptions, GenerateError, GenerationOutcome};
use crate::ml::model::{WordLstm, WordLstmConfig};

type InferBackend = burn::backend::NdArray;

/// Mismatch between the vocabulary the checkpoint was trained with
/// and the one rebuilt from the current corpus. Recoverable: ids the
/// model never saw decode to the unknown placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabDrift {
    pub stored:  usize,
    pub rebuilt: usize,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

pub struct InferenceContext {
    model:         WordLstm<InferBackend>,
    vocab:         Vocabulary,
    window_length: usize,
    device:        <InferBackend as Backend>::Device,
    drift:         Option<VocabDrift>,
}

impl InferenceContext {
    /// Build a fresh context from a checkpoint directory and the raw
    /// corpus text. The vocabulary is rebuilt from the cleaned corpus
    /// exactly as it was at training time.
    pub fn load(store: &CheckpointStore, corpus_text: &str) -> Result<Self, InferenceError> {
        let cfg    = store.load_config()?;
        let device = Default::default();

        let cleaned = Preprocessor::new().clean(corpus_text);
        let vocab   = Vocabulary::build(&cleaned);

        // Size the model from the checkpoint, not the rebuilt vocabulary
        let stored_vocab_size = store.vocab_size()?;
        let model_cfg = WordLstmConfig::new(stored_vocab_size)
            .with_embed_size(cfg.embed_size)
            .with_hidden_size(cfg.hidden_size)
            .with_min_vocab_size(cfg.min_vocab_size);
        let model: WordLstm<InferBackend> = model_cfg.init(&device);
        let (model, stored_vocab_size)    = store.load(model, &device)?;

        let drift = if stored_vocab_size != vocab.size() {
            tracing::warn!(
                "Vocabulary drift: checkpoint was trained with vocab_size={} \
                 but the corpus now yields {}",
                stored_vocab_size,
                vocab.size(),
            );
            Some(VocabDrift { stored: stored_vocab_size, rebuilt: vocab.size() })
        } else {
            None
        };

        tracing::info!("Model loaded from checkpoint (vocab_size={})", stored_vocab_size);
        Ok(Self {
            model,
            vocab,
            window_length: cfg.window_length,
            device,
            drift,
        })
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Context window length the model was trained with.
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// The drift detected at load time, if any.
    pub fn vocab_drift(&self) -> Option<VocabDrift> {
        self.drift
    }

    /// Run the decode loop against this context's model and vocabulary.
    pub fn generate(
        &self,
        seed_text: &str,
        options:   &DecodeOptions,
    ) -> Result<GenerationOutcome, GenerateError> {
        generator::generate(self, &self.vocab, seed_text, options)
    }
}

impl NextTokenScorer for InferenceContext {
    fn score(&self, context: &[usize]) -> Result<Vec<f32>, ScoreError> {
        let ids: Vec<i32> = context.iter().map(|&id| id as i32).collect();
        let input = Tensor::<InferBackend, 1, Int>::from_ints(ids.as_slice(), &self.device)
            .reshape([1, context.len()]);

        let logits = self.model.forward(input);
        logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ScoreError::Numeric(format!("{e:?}")))
    }

    fn vocab_size(&self) -> usize {
        self.model.vocab_size()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use crate::ml::generator::StopReason;

    /// Save an untrained tiny model plus its config, the way a
    /// training run would.
    fn seed_checkpoint(dir: &str, vocab_size: usize) -> CheckpointStore {
        let store = CheckpointStore::new(dir);
        let cfg   = TrainConfig {
            corpus_path:    String::new(),
            checkpoint_dir: dir.to_string(),
            window_length:  3,
            batch_size:     4,
            epochs:         1,
            lr:             1e-3,
            embed_size:     8,
            hidden_size:    12,
            min_vocab_size: 4,
            seed:           42,
        };
        store.save_config(&cfg).unwrap();

        let model: WordLstm<InferBackend> = WordLstmConfig::new(vocab_size)
            .with_embed_size(cfg.embed_size)
            .with_hidden_size(cfg.hidden_size)
            .with_min_vocab_size(cfg.min_vocab_size)
            .init(&Default::default());
        store.save(&model, model.vocab_size()).unwrap();
        store
    }

    #[test]
    fn test_load_and_greedy_generate_is_deterministic() {
        let dir    = tempfile::tempdir().unwrap();
        let corpus = "hello world hello again world again";
        // cleaned corpus has 3 distinct tokens → vocab size 4
        let store  = seed_checkpoint(dir.path().to_str().unwrap(), 4);

        let ctx = InferenceContext::load(&store, corpus).unwrap();
        assert!(ctx.vocab_drift().is_none());

        let opts   = DecodeOptions::greedy(5, ctx.window_length());
        let first  = ctx.generate("hello world", &opts).unwrap();
        let second = ctx.generate("hello world", &opts).unwrap();

        assert_eq!(first.text, second.text);
        assert_eq!(first.produced, 5);
        assert_eq!(first.stop, StopReason::ReachedMaxLength);
    }

    #[test]
    fn test_vocab_drift_is_surfaced_not_fatal() {
        let dir   = tempfile::tempdir().unwrap();
        let store = seed_checkpoint(dir.path().to_str().unwrap(), 5);

        // Corpus changed since training: 2 distinct tokens → size 3
        let ctx = InferenceContext::load(&store, "fresh corpus").unwrap();
        assert_eq!(
            ctx.vocab_drift(),
            Some(VocabDrift { stored: 5, rebuilt: 3 }),
        );

        // Generation still works against the rebuilt vocabulary
        let opts = DecodeOptions::greedy(3, ctx.window_length());
        let out  = ctx.generate("fresh", &opts).unwrap();
        assert_eq!(out.produced, 3);
    }

    #[test]
    fn test_missing_checkpoint_is_a_distinct_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().to_str().unwrap());

        let err = match InferenceContext::load(&store, "hello world") {
            Ok(_)  => panic!("load succeeded with no checkpoint on disk"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            InferenceError::Checkpoint(CheckpointError::Missing(_)),
        ));
    }
}
