// ============================================================
// Layer 5 — Word-Level LSTM Language Model
// ============================================================
// Next-token predictor over integer-id context windows:
//
//   ids [batch, W]
//     → embedding lookup         [batch, W, embed]
//     → single-layer LSTM        [batch, W, hidden]
//     → last timestep only       [batch, hidden]
//     → linear projection        [batch, vocab_size]
//
// Only the final hidden state is projected — this is a
// next-token predictor, not a sequence-to-sequence model.
//
// The vocabulary size is frozen at construction (floored at
// `min_vocab_size` so a tiny corpus cannot produce a degenerate
// output layer) and recorded in every checkpoint. Changing it
// requires rebuilding the model.
//
// Reference: Burn Book §3 (Building Blocks)
//            Hochreiter & Schmidhuber (1997) LSTM

use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct WordLstmConfig {
    /// Size of the id space the model predicts over (vocabulary
    /// tokens plus the reserved unknown id 0)
    pub vocab_size: usize,

    /// Width of the token embedding vectors
    #[config(default = 128)]
    pub embed_size: usize,

    /// Width of the LSTM hidden state
    #[config(default = 256)]
    pub hidden_size: usize,

    /// Floor applied to vocab_size before sizing the embedding and
    /// output layers — guards against pathologically small
    /// vocabularies causing index errors downstream
    #[config(default = 1000)]
    pub min_vocab_size: usize,
}

impl WordLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> WordLstm<B> {
        let vocab_size = self.vocab_size.max(self.min_vocab_size);

        let embedding = EmbeddingConfig::new(vocab_size, self.embed_size).init(device);
        let lstm      = LstmConfig::new(self.embed_size, self.hidden_size, true).init(device);
        let head      = LinearConfig::new(self.hidden_size, vocab_size).init(device);

        WordLstm {
            embedding,
            lstm,
            head,
            vocab_size,
            hidden_size: self.hidden_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct WordLstm<B: Backend> {
    embedding: Embedding<B>,
    lstm:      Lstm<B>,
    head:      Linear<B>,

    /// Effective (floored) vocabulary size, frozen at construction
    vocab_size: usize,
    hidden_size: usize,
}

impl<B: Backend> WordLstm<B> {
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Logits over the vocabulary for the token following each context.
    ///
    /// Input shape [batch, window_length], output [batch, vocab_size].
    /// Ids ≥ vocab_size are clamped to vocab_size − 1 before the
    /// embedding lookup — availability over correctness; callers that
    /// prefer fail-fast should validate ids before calling (see
    /// `OovPolicy` in the generator).
    pub fn forward(&self, contexts: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, window_length] = contexts.dims();

        let ids      = contexts.clamp(0, self.vocab_size as i32 - 1);
        let embedded = self.embedding.forward(ids);

        // Hidden and cell state carry across the window; only the
        // final timestep's hidden state feeds the output head.
        let (hidden_seq, _state) = self.lstm.forward(embedded, None);
        let last = hidden_seq
            .slice([0..batch_size, window_length - 1..window_length])
            .reshape([batch_size, self.hidden_size]);

        self.head.forward(last)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn tiny_model(vocab_size: usize) -> WordLstm<NdArray> {
        WordLstmConfig::new(vocab_size)
            .with_embed_size(8)
            .with_hidden_size(12)
            .with_min_vocab_size(4)
            .init(&Default::default())
    }

    fn context_batch(ids: &[i32], batch: usize, window: usize) -> Tensor<NdArray, 2, Int> {
        Tensor::<NdArray, 1, Int>::from_ints(ids, &Default::default())
            .reshape([batch, window])
    }

    #[test]
    fn test_forward_shape() {
        let model  = tiny_model(10);
        let input  = context_batch(&[1, 2, 3, 4, 5, 6], 2, 3);
        let logits = model.forward(input);
        assert_eq!(logits.dims(), [2, 10]);
    }

    #[test]
    fn test_vocab_size_floor() {
        // An empty corpus yields vocab_size 1; the floor keeps the
        // output layer usable
        let model: WordLstm<NdArray> = WordLstmConfig::new(1)
            .with_embed_size(8)
            .with_hidden_size(12)
            .init(&Default::default());
        assert_eq!(model.vocab_size(), 1000);
    }

    #[test]
    fn test_out_of_range_ids_are_clamped_not_fatal() {
        let model  = tiny_model(6);
        // id 50 is far outside the vocabulary of 6
        let input  = context_batch(&[50, 1, 0, 2], 2, 2);
        let logits = model.forward(input);
        assert_eq!(logits.dims(), [2, 6]);
    }
}
