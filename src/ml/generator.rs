// ============================================================
// Layer 5 — Autoregressive Generator
// ============================================================
// Produces text one token at a time from a seed, scoring each
// trailing context window through the NextTokenScorer trait
// (one forward pass per produced token, parameters read-only).
//
// Two decoding policies:
//   Greedy  — always take the arg-max id
//   Sample  — divide logits by a temperature, keep the top-k
//             ids, softmax over those k, draw one
//
// Context management is identical for both: the trailing
// `window_length` ids, left-padded with the unknown id 0 when
// the sequence is shorter than the window.
//
// Unknown-id policy (unified for both paths): an id with no
// inverse-vocabulary entry appends the <UNK> placeholder and
// feeds id 0 into the next context.
//
// Fail-soft: a scoring failure stops decoding and the partial
// sequence is returned with the reason, never an error.

use rand::{distributions::WeightedIndex, prelude::*};
use thiserror::Error;

use crate::domain::{
    traits::{NextTokenScorer, ScoreError},
    vocab::{Vocabulary, UNKNOWN_ID, UNKNOWN_TOKEN},
};

/// How the next token is chosen from the logits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodePolicy {
    /// Highest-scoring id, first index on ties. Deterministic.
    Greedy,

    /// Temperature-scaled top-k sampling. `temperature` < 1 sharpens
    /// the distribution toward the mode, > 1 flattens it; `top_k = 1`
    /// degenerates to greedy.
    Sample { temperature: f32, top_k: usize },
}

/// What to do with a seed id that falls outside the scorer's
/// vocabulary (possible after vocabulary drift across retraining).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OovPolicy {
    /// Map to vocab_size − 1 (lossy but available) — the default
    #[default]
    Clamp,

    /// Fail fast before any token is produced
    Reject,
}

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Maximum number of produced tokens (the seed is not counted)
    pub max_length: usize,

    /// Fixed context window length the scorer expects
    pub window_length: usize,

    pub policy: DecodePolicy,
    pub oov:    OovPolicy,
}

impl DecodeOptions {
    pub fn greedy(max_length: usize, window_length: usize) -> Self {
        Self {
            max_length,
            window_length,
            policy: DecodePolicy::Greedy,
            oov:    OovPolicy::default(),
        }
    }

    pub fn sampling(
        max_length:    usize,
        window_length: usize,
        temperature:   f32,
        top_k:         usize,
    ) -> Self {
        Self {
            max_length,
            window_length,
            policy: DecodePolicy::Sample { temperature, top_k },
            oov:    OovPolicy::default(),
        }
    }
}

/// Why the decode loop ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// Produced `max_length` tokens
    ReachedMaxLength,

    /// A scoring step failed; the outcome holds the partial sequence
    ScoringFailed(ScoreError),
}

/// The generated sequence plus how decoding ended.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Seed words followed by produced words, space-joined
    pub text: String,

    /// Number of tokens produced beyond the seed
    pub produced: usize,

    pub stop: StopReason,
}

/// Invalid decode requests, rejected before any scoring happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("temperature must be positive, got {0}")]
    InvalidTemperature(f32),

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("seed token id {id} is outside the vocabulary (size {vocab_size})")]
    SeedOutOfVocabulary { id: usize, vocab_size: usize },
}

/// Decode with a thread-local RNG. Greedy decoding never touches
/// the RNG, so it is deterministic through this entry point too.
pub fn generate<S: NextTokenScorer>(
    scorer:    &S,
    vocab:     &Vocabulary,
    seed_text: &str,
    options:   &DecodeOptions,
) -> Result<GenerationOutcome, GenerateError> {
    generate_with_rng(scorer, vocab, seed_text, options, &mut rand::thread_rng())
}

/// Decode with a caller-supplied RNG (seeded in tests).
pub fn generate_with_rng<S: NextTokenScorer, R: Rng>(
    scorer:    &S,
    vocab:     &Vocabulary,
    seed_text: &str,
    options:   &DecodeOptions,
    rng:       &mut R,
) -> Result<GenerationOutcome, GenerateError> {
    if let DecodePolicy::Sample { temperature, top_k } = options.policy {
        if !(temperature > 0.0) {
            return Err(GenerateError::InvalidTemperature(temperature));
        }
        if top_k == 0 {
            return Err(GenerateError::InvalidTopK);
        }
    }

    let vocab_size = scorer.vocab_size();

    // ── Seed mapping: unknown → 0, out-of-range per OovPolicy ─────────────────
    let mut words: Vec<String> = seed_text
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut ids = Vec::with_capacity(words.len() + options.max_length);
    for word in &words {
        let id = vocab.seed_id(word);
        let id = if id >= vocab_size {
            match options.oov {
                OovPolicy::Clamp  => vocab_size - 1,
                OovPolicy::Reject => {
                    return Err(GenerateError::SeedOutOfVocabulary { id, vocab_size })
                }
            }
        } else {
            id
        };
        ids.push(id);
    }

    // ── Decode loop ───────────────────────────────────────────────────────────
    let mut produced = 0usize;
    let mut stop     = StopReason::ReachedMaxLength;

    for _ in 0..options.max_length {
        // Every id here is in range: seed ids were validated above, and
        // produced ids are logit indices or the sentinel 0.
        let context = trailing_window(&ids, options.window_length);

        let logits = match scorer.score(&context) {
            Ok(logits) => logits,
            Err(e) => {
                stop = StopReason::ScoringFailed(e);
                break;
            }
        };

        let next_id = match options.policy {
            DecodePolicy::Greedy => argmax(&logits),
            DecodePolicy::Sample { temperature, top_k } => {
                sample_top_k(&logits, temperature, top_k, rng)
            }
        };

        // An id without an inverse entry becomes the <UNK> placeholder
        // and contributes the sentinel id to the next context.
        match vocab.token_of(next_id) {
            Some(token) => {
                words.push(token.to_string());
                ids.push(next_id);
            }
            None => {
                words.push(UNKNOWN_TOKEN.to_string());
                ids.push(UNKNOWN_ID);
            }
        }
        produced += 1;
    }

    Ok(GenerationOutcome {
        text: words.join(" "),
        produced,
        stop,
    })
}

/// The trailing `window_length` ids, left-padded with the unknown id
/// when the sequence is shorter than the window. Never longer than
/// `window_length`.
fn trailing_window(ids: &[usize], window_length: usize) -> Vec<usize> {
    if ids.len() >= window_length {
        ids[ids.len() - window_length..].to_vec()
    } else {
        let mut context = vec![UNKNOWN_ID; window_length - ids.len()];
        context.extend_from_slice(ids);
        context
    }
}

/// First index of the maximum logit — ties resolve to the lowest id
/// so greedy decoding stays deterministic.
fn argmax(logits: &[f32]) -> usize {
    let mut best       = 0usize;
    let mut best_score = f32::NEG_INFINITY;
    for (i, &score) in logits.iter().enumerate() {
        if score > best_score {
            best       = i;
            best_score = score;
        }
    }
    best
}

/// Temperature + top-k draw.
///
/// Logits are divided by the temperature, the k highest ids kept
/// (ties toward lower ids, matching `argmax` so `top_k = 1` is exactly
/// greedy), and the kept scores renormalised with a max-subtracted
/// softmax before drawing.
fn sample_top_k<R: Rng>(logits: &[f32], temperature: f32, top_k: usize, rng: &mut R) -> usize {
    let scaled: Vec<f32> = logits.iter().map(|l| l / temperature).collect();

    let mut ranked: Vec<usize> = (0..scaled.len()).collect();
    ranked.sort_by(|&a, &b| {
        scaled[b]
            .partial_cmp(&scaled[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    ranked.truncate(top_k.min(scaled.len()).max(1));

    let max = scaled[ranked[0]];
    let weights: Vec<f32> = ranked.iter().map(|&i| (scaled[i] - max).exp()).collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => ranked[dist.sample(rng)],
        // Degenerate weights (all zero / non-finite): take the mode
        Err(_) => ranked[0],
    }
}
