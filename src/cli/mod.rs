// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — trains the model on a plain-text corpus
//   2. `generate` — loads a checkpoint and generates text
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, GenerateArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "word-lm",
    version = "0.1.0",
    about = "Train a word-level LSTM language model on a text corpus, then generate text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => Self::run_train(args),
            Commands::Generate(args) => Self::run_generate(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on corpus: {}", args.corpus);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_generate(args: GenerateArgs) -> Result<()> {
        use crate::application::generate_use_case::GenerateUseCase;

        let use_case = GenerateUseCase::new(
            args.checkpoint_dir.clone(),
            args.corpus.clone(),
        )?;

        let options = args.decode_options(use_case.window_length());
        let text    = use_case.generate(&args.prompt, &options)?;
        println!("{text}");
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use crate::ml::generator::{DecodePolicy, OovPolicy};

    #[test]
    fn test_train_args_parse_and_convert() {
        let cli = Cli::try_parse_from([
            "word-lm", "train", "--corpus", "c.txt", "--epochs", "2",
        ])
        .unwrap();

        let Commands::Train(args) = cli.command else {
            panic!("expected the train subcommand");
        };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.corpus_path, "c.txt");
        assert_eq!(cfg.epochs, 2);
        assert_eq!(cfg.window_length, 10);
        assert_eq!(cfg.batch_size, 32);
    }

    #[test]
    fn test_generate_defaults_are_greedy_with_clamp() {
        let cli = Cli::try_parse_from([
            "word-lm", "generate", "--prompt", "hello world",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected the generate subcommand");
        };
        let opts = args.decode_options(10);
        assert_eq!(opts.max_length, 50);
        assert_eq!(opts.window_length, 10);
        assert_eq!(opts.policy, DecodePolicy::Greedy);
        assert_eq!(opts.oov, OovPolicy::Clamp);
    }

    #[test]
    fn test_sample_flag_builds_the_sampling_policy() {
        let cli = Cli::try_parse_from([
            "word-lm", "generate", "--prompt", "x", "--sample", "--top-k", "5",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected the generate subcommand");
        };
        let opts = args.decode_options(3);
        assert_eq!(opts.policy, DecodePolicy::Sample { temperature: 0.8, top_k: 5 });
    }
}
