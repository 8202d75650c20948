// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Maps whitespace tokens to integer ids and back.
//
// Id layout:
//   0          — reserved unknown-token sentinel, never assigned
//   1..size()  — one id per distinct token, in first-appearance
//                order (deterministic across runs for the same text)
//
// Built once from the cleaned training corpus and immutable
// afterwards. The model's output layer is sized from `size()`
// (with a minimum floor applied at model construction).
//
// Reference: Rust Book §8 (HashMaps)

use std::collections::HashMap;

/// Token id reserved for words outside the vocabulary.
pub const UNKNOWN_ID: usize = 0;

/// Placeholder string emitted when a generated id has no inverse entry.
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// Bidirectional token ↔ id mapping over a whitespace-split corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// token → id, ids start at 1
    forward: HashMap<String, usize>,

    /// id − 1 → token (exact inverse of `forward`)
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from cleaned text.
    ///
    /// Splits on whitespace and assigns each distinct token the next
    /// free id, starting at 1. Empty input yields an empty vocabulary —
    /// callers must apply a minimum-size floor before sizing a model
    /// from it (see `WordLstmConfig::min_vocab_size`).
    pub fn build(text: &str) -> Self {
        let mut forward = HashMap::new();
        let mut tokens  = Vec::new();

        for word in text.split_whitespace() {
            if !forward.contains_key(word) {
                tokens.push(word.to_string());
                forward.insert(word.to_string(), tokens.len());
            }
        }

        Self { forward, tokens }
    }

    /// Number of distinct tokens (excluding the unknown sentinel).
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Size of the id space: distinct tokens plus the reserved id 0.
    /// Every id in [1, size()) maps to exactly one token.
    pub fn size(&self) -> usize {
        self.tokens.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Id of a token, or `None` if it was never seen.
    pub fn id_of(&self, token: &str) -> Option<usize> {
        self.forward.get(token).copied()
    }

    /// Token string for an id, or `None` for id 0 and out-of-range ids.
    pub fn token_of(&self, id: usize) -> Option<&str> {
        if id == UNKNOWN_ID {
            return None;
        }
        self.tokens.get(id - 1).map(String::as_str)
    }

    /// Generation-time lookup: unknown words map to the sentinel id 0.
    pub fn seed_id(&self, token: &str) -> usize {
        self.id_of(token).unwrap_or(UNKNOWN_ID)
    }

    /// Encode a cleaned text into ids, skipping tokens that are not in
    /// the vocabulary. Over the corpus the vocabulary was built from,
    /// nothing is skipped.
    pub fn encode(&self, text: &str) -> Vec<usize> {
        text.split_whitespace()
            .filter_map(|w| self.id_of(w))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_ids_from_one() {
        let v = Vocabulary::build("hello world hello");
        assert_eq!(v.token_count(), 2);
        assert_eq!(v.id_of("hello"), Some(1));
        assert_eq!(v.id_of("world"), Some(2));
    }

    #[test]
    fn test_inverse_is_exact() {
        let v = Vocabulary::build("the quick brown fox jumps over the lazy dog");
        for id in 1..v.size() {
            let token = v.token_of(id).unwrap();
            assert_eq!(v.id_of(token), Some(id));
        }
    }

    #[test]
    fn test_id_zero_is_reserved() {
        let v = Vocabulary::build("a b c");
        assert_eq!(v.token_of(0), None);
        assert_eq!(v.seed_id("unseen"), UNKNOWN_ID);
    }

    #[test]
    fn test_empty_input() {
        let v = Vocabulary::build("");
        assert!(v.is_empty());
        assert_eq!(v.token_count(), 0);
        assert_eq!(v.size(), 1);
    }

    #[test]
    fn test_first_appearance_order_is_deterministic() {
        let a = Vocabulary::build("one two three two one");
        let b = Vocabulary::build("one two three two one");
        assert_eq!(a.id_of("one"),   b.id_of("one"));
        assert_eq!(a.id_of("two"),   Some(2));
        assert_eq!(a.id_of("three"), Some(3));
    }

    #[test]
    fn test_encode_skips_unknown() {
        let v   = Vocabulary::build("hello world");
        let ids = v.encode("hello stranger world");
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_out_of_range_has_no_inverse() {
        let v = Vocabulary::build("only");
        assert_eq!(v.token_of(99), None);
    }
}
