// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `generate`
// and all their configurable flags.
//
// clap's derive macros generate help text, error messages for
// missing args, and string → number conversion automatically.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::ml::generator::{DecodeOptions, DecodePolicy, OovPolicy};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the language model on a plain-text corpus
    Train(TrainArgs),

    /// Generate text from a trained checkpoint
    Generate(GenerateArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus: a .txt file or a directory of .txt files
    #[arg(long, default_value = "data/corpus")]
    pub corpus: String,

    /// Directory to save the checkpoint, config, and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of preceding tokens the model sees when predicting
    /// the next one
    #[arg(long, default_value_t = 10)]
    pub window_length: usize,

    /// Number of windows processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the training windows
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the token embedding vectors
    #[arg(long, default_value_t = 128)]
    pub embed_size: usize,

    /// Width of the LSTM hidden state
    #[arg(long, default_value_t = 256)]
    pub hidden_size: usize,

    /// Floor applied to the vocabulary size before sizing the model
    #[arg(long, default_value_t = 1000)]
    pub min_vocab_size: usize,

    /// Seed for batch shuffling, for reproducible runs
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path:    a.corpus,
            checkpoint_dir: a.checkpoint_dir,
            window_length:  a.window_length,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            embed_size:     a.embed_size,
            hidden_size:    a.hidden_size,
            min_vocab_size: a.min_vocab_size,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Seed text the generation continues from
    #[arg(long)]
    pub prompt: String,

    /// Corpus used during training (the vocabulary is rebuilt from it)
    #[arg(long, default_value = "data/corpus")]
    pub corpus: String,

    /// Directory where the checkpoint was saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Maximum number of tokens to produce beyond the prompt
    #[arg(long, default_value_t = 50)]
    pub max_length: usize,

    /// Sample from the model instead of greedy arg-max decoding
    #[arg(long, default_value_t = false)]
    pub sample: bool,

    /// Sampling temperature (< 1 sharpens, > 1 flattens); only used
    /// with --sample
    #[arg(long, default_value_t = 0.8)]
    pub temperature: f32,

    /// Number of highest-scoring candidates to sample from; only used
    /// with --sample
    #[arg(long, default_value_t = 40)]
    pub top_k: usize,

    /// Fail on prompt tokens outside the model's vocabulary instead of
    /// clamping them
    #[arg(long, default_value_t = false)]
    pub reject_oov: bool,
}

impl GenerateArgs {
    /// Build decode options from the flags; the window length comes
    /// from the training config, not the command line.
    pub fn decode_options(&self, window_length: usize) -> DecodeOptions {
        let policy = if self.sample {
            DecodePolicy::Sample {
                temperature: self.temperature,
                top_k:       self.top_k,
            }
        } else {
            DecodePolicy::Greedy
        };

        DecodeOptions {
            max_length: self.max_length,
            window_length,
            policy,
            oov: if self.reject_oov { OovPolicy::Reject } else { OovPolicy::Clamp },
        }
    }
}
