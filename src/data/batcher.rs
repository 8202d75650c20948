// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Implements Burn's Batcher trait to stack TokenWindows into
// tensor batches for the training loop.
//
//   Input:  Vec of N TokenWindows, each with a context of length W
//   Output: WindowBatch with contexts [N, W] and targets [N]
//
// All contexts already share the same length, so batching is a
// flatten-and-reshape with no dynamic padding.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TokenWindow;

/// A batch of context windows ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Context token ids — shape: [batch_size, window_length]
    pub contexts: Tensor<B, 2, Int>,

    /// Next-token target ids — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TokenWindow, WindowBatch<B>> for WindowBatcher<B> {
    fn batch(&self, items: Vec<TokenWindow>) -> WindowBatch<B> {
        let batch_size    = items.len();
        let window_length = items[0].context.len();

        // Flatten all contexts into one Vec<i32> for the tensor
        // constructor; the backend widens to its own IntElem
        let context_flat: Vec<i32> = items
            .iter()
            .flat_map(|w| w.context.iter().map(|&id| id as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .map(|w| w.target as i32)
            .collect();

        let contexts = Tensor::<B, 1, Int>::from_ints(
            context_flat.as_slice(), &self.device,
        ).reshape([batch_size, window_length]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device,
        );

        WindowBatch { contexts, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = WindowBatcher::<NdArray>::new(device);

        let items = vec![
            TokenWindow { context: vec![1, 2, 3], target: 4 },
            TokenWindow { context: vec![2, 3, 4], target: 5 },
        ];
        let batch = batcher.batch(items);

        assert_eq!(batch.contexts.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(),  [2]);
    }

    #[test]
    fn test_batch_preserves_values() {
        let device  = Default::default();
        let batcher = WindowBatcher::<NdArray>::new(device);

        let items = vec![TokenWindow { context: vec![7, 8], target: 9 }];
        let batch = batcher.batch(items);

        // NdArray stores Int tensors as i64, so read back as i64
        let contexts: Vec<i64> = batch.contexts.into_data().to_vec().unwrap();
        let targets:  Vec<i64> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(contexts, vec![7, 8]);
        assert_eq!(targets,  vec![9]);
    }
}
