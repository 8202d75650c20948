// ============================================================
// Layer 4 — Sequence Windower
// ============================================================
// Slices the flat token-id stream into fixed-length training
// windows, sliding by one position:
//
//   context = tokens[i .. i+W]
//   target  = tokens[i+W]          for i in [0, len − W)
//
// A stream of length N with window length W < N yields exactly
// N − W pairs. A stream with len ≤ W yields zero pairs — the
// caller must treat that as an explicit empty-training-set
// condition rather than letting the batcher fail downstream.
//
// Reference: Rust Book §13 (Iterators and Closures)

use crate::data::dataset::TokenWindow;

/// Produce all (context, target) windows of length `window_length`
/// from a token-id stream.
pub fn windows(tokens: &[usize], window_length: usize) -> Vec<TokenWindow> {
    if window_length == 0 || tokens.len() <= window_length {
        return Vec::new();
    }

    (0..tokens.len() - window_length)
        .map(|i| TokenWindow {
            context: tokens[i..i + window_length].to_vec(),
            target:  tokens[i + window_length],
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count_is_len_minus_w() {
        let tokens: Vec<usize> = (1..=20).collect();
        assert_eq!(windows(&tokens, 5).len(), 15);
    }

    #[test]
    fn test_context_and_target_contents() {
        let tokens = vec![10, 20, 30, 40, 50];
        let wins   = windows(&tokens, 3);

        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].context, vec![10, 20, 30]);
        assert_eq!(wins[0].target,  40);
        assert_eq!(wins[1].context, vec![20, 30, 40]);
        assert_eq!(wins[1].target,  50);
    }

    #[test]
    fn test_every_context_has_window_length() {
        let tokens: Vec<usize> = (0..50).collect();
        for w in windows(&tokens, 7) {
            assert_eq!(w.context.len(), 7);
        }
    }

    #[test]
    fn test_target_follows_context_in_stream() {
        let tokens: Vec<usize> = (100..140).collect();
        for (i, w) in windows(&tokens, 4).iter().enumerate() {
            assert_eq!(w.target, tokens[i + 4]);
        }
    }

    #[test]
    fn test_stream_shorter_than_window_yields_nothing() {
        let tokens = vec![1, 2, 3];
        assert!(windows(&tokens, 3).is_empty());
        assert!(windows(&tokens, 10).is_empty());
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        assert!(windows(&[], 5).is_empty());
    }
}
