// ============================================================
// Layer 2 — Generate Use Case
// ============================================================
// Builds the inference context (checkpoint + rebuilt vocabulary)
// once, then serves generation requests against it. The context
// is immutable; reloading means constructing a fresh use case.

use anyhow::Result;

use crate::data::loader::CorpusLoader;
use crate::infra::checkpoint::CheckpointStore;
use crate::ml::generator::{DecodeOptions, StopReason};
use crate::ml::inference::InferenceContext;

pub struct GenerateUseCase {
    context: InferenceContext,
}

impl GenerateUseCase {
    /// Load the checkpoint and rebuild the vocabulary from the same
    /// corpus the model was trained on. Vocabulary drift is logged by
    /// the inference context and does not prevent construction.
    pub fn new(checkpoint_dir: String, corpus_path: String) -> Result<Self> {
        let store   = CheckpointStore::new(&checkpoint_dir);
        let corpus  = CorpusLoader::new(&corpus_path).load()?;
        let context = InferenceContext::load(&store, &corpus)?;
        Ok(Self { context })
    }

    /// Window length the model was trained with — the decode options
    /// must use it.
    pub fn window_length(&self) -> usize {
        self.context.window_length()
    }

    /// Decode from the seed and return the full text (seed + produced
    /// tokens). A scoring failure mid-decode degrades to the partial
    /// sequence with a warning, per the fail-soft contract.
    pub fn generate(&self, seed_text: &str, options: &DecodeOptions) -> Result<String> {
        let outcome = self.context.generate(seed_text, options)?;

        if let StopReason::ScoringFailed(e) = &outcome.stop {
            tracing::warn!(
                "Generation stopped after {} token(s): {}",
                outcome.produced,
                e,
            );
        }

        Ok(outcome.text)
    }
}
