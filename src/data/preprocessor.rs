// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw corpus text before vocabulary construction.
//
// Cleaning steps (applied in order):
//   1. Lowercase everything
//   2. Strip punctuation (anything that is not alphanumeric,
//      underscore, or whitespace)
//   3. Collapse all whitespace runs into single spaces
//   4. Trim leading/trailing whitespace
//
// The result is a flat, space-separated token stream — exactly
// the input shape the Vocabulary builder expects.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string for downstream tokenisation.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1 + 2: lowercase and drop punctuation ────────────────────────
        // Word characters (alphanumeric + underscore) and whitespace survive;
        // everything else is removed so "don't" becomes "dont", not "don t".
        let stripped: String = text
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        // ── Step 3 + 4: collapse whitespace and trim ──────────────────────────
        // split_whitespace handles spaces, tabs, newlines, and Unicode
        // whitespace variants in one pass.
        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("Hello World"), "hello world");
    }

    #[test]
    fn test_strips_punctuation() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello, world!"), "hello world");
        assert_eq!(p.clean("don't"), "dont");
    }

    #[test]
    fn test_collapses_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello \t\n  world"), "hello world");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello world  "), "hello world");
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("term_2 starts 2024"), "term_2 starts 2024");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }
}
