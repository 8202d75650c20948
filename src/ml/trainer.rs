// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch gradient descent over windowed sequences:
// shuffle, batch, forward, cross-entropy against the target id,
// backward, Adam step. Runs exactly `epochs` passes — there is
// no validation split and no early stopping.
//
// Reports the epoch-average training loss, not the last batch's.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Context, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::WindowBatcher, dataset::WindowDataset};
use crate::infra::checkpoint::CheckpointStore;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{WordLstm, WordLstmConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Train a fresh model on the windowed dataset and write one
/// checkpoint (weights + vocab_size) at the end of the run.
pub fn run_training(
    cfg:        &TrainConfig,
    dataset:    WindowDataset,
    vocab_size: usize,
    ckpt_store: &CheckpointStore,
    metrics:    &MetricsLogger,
) -> Result<()> {
    if dataset.window_count() == 0 {
        bail!(
            "training set is empty: the corpus must contain more than \
             window_length ({}) tokens",
            cfg.window_length
        );
    }

    let device = Default::default();

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = WordLstmConfig::new(vocab_size)
        .with_embed_size(cfg.embed_size)
        .with_hidden_size(cfg.hidden_size)
        .with_min_vocab_size(cfg.min_vocab_size);
    let mut model: WordLstm<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab_size={} embed={} hidden={}",
        model.vocab_size(), cfg.embed_size, cfg.hidden_size,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Data loader: shuffled mini-batches each epoch ─────────────────────────
    let batcher = WindowBatcher::<TrainBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(dataset);

    let loss_fn = CrossEntropyLossConfig::new().init(&device);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let logits = model.forward(batch.contexts);
            let loss   = loss_fn.forward(logits, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_loss = if batches > 0 {
            loss_sum / batches as f64
        } else {
            f64::NAN
        };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4}",
            epoch, cfg.epochs, avg_loss,
        );
        metrics.log(&EpochMetrics::new(epoch, avg_loss))?;
    }

    // One checkpoint per training run, written after the last epoch
    ckpt_store
        .save(&model, model.vocab_size())
        .context("Failed to save final checkpoint")?;

    tracing::info!("Training complete");
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::windower::windows;
    use crate::infra::checkpoint::CheckpointStore;

    fn tiny_config(dir: &str) -> TrainConfig {
        TrainConfig {
            corpus_path:    String::new(),
            checkpoint_dir: dir.to_string(),
            window_length:  3,
            batch_size:     4,
            epochs:         1,
            lr:             1e-3,
            embed_size:     8,
            hidden_size:    12,
            min_vocab_size: 8,
            seed:           42,
        }
    }

    #[test]
    fn test_empty_dataset_is_an_explicit_error() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = tiny_config(dir.path().to_str().unwrap());
        let store   = CheckpointStore::new(dir.path().to_str().unwrap());
        let metrics = MetricsLogger::new(dir.path().to_str().unwrap()).unwrap();

        let result = run_training(&cfg, WindowDataset::new(Vec::new()), 8, &store, &metrics);
        assert!(result.is_err());
    }

    #[test]
    fn test_one_epoch_writes_a_checkpoint() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = tiny_config(dir.path().to_str().unwrap());
        let store   = CheckpointStore::new(dir.path().to_str().unwrap());
        let metrics = MetricsLogger::new(dir.path().to_str().unwrap()).unwrap();

        let tokens: Vec<usize> = (1..=6).cycle().take(30).collect();
        let dataset = WindowDataset::new(windows(&tokens, cfg.window_length));

        run_training(&cfg, dataset, 7, &store, &metrics).unwrap();
        assert!(dir.path().join("model.mpk").exists());
        assert!(dir.path().join("checkpoint.json").exists());
    }
}
