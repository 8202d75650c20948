// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads the plain-text training corpus from disk.
//
// The path may be a single .txt file or a directory, in which
// case every .txt file in it is read and concatenated in
// filename order. Extraction from richer formats (PDF, Word)
// is an upstream concern — this layer only consumes the text
// those collaborators produce.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Reads the raw training corpus from a file or directory of .txt files.
pub struct CorpusLoader {
    /// Path to a .txt file or a directory containing .txt files
    path: String,
}

impl CorpusLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Load the whole corpus as one string.
    ///
    /// A missing directory yields an empty corpus with a warning rather
    /// than an error, so the empty-vocabulary case surfaces where the
    /// caller can report it meaningfully.
    pub fn load(&self) -> Result<String> {
        let path = Path::new(&self.path);

        if !path.exists() {
            tracing::warn!(
                "Corpus path '{}' does not exist — returning empty corpus",
                self.path
            );
            return Ok(String::new());
        }

        if path.is_file() {
            return fs::read_to_string(path)
                .with_context(|| format!("Cannot read corpus file '{}'", self.path));
        }

        // Directory: gather .txt files, sorted for a stable concatenation order
        let mut files = Vec::new();
        for entry in fs::read_dir(path)
            .with_context(|| format!("Cannot read directory '{}'", self.path))?
        {
            let entry = entry?;
            let p     = entry.path();
            if p.extension().and_then(|e| e.to_str()) == Some("txt") {
                files.push(p);
            }
        }
        files.sort();

        let mut corpus = String::new();
        for file in &files {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Cannot read corpus file '{}'", file.display()))?;
            tracing::debug!("Loaded: {} ({} chars)", file.display(), text.len());
            corpus.push_str(&text);
            corpus.push('\n');
        }

        tracing::info!("Loaded {} corpus file(s) from '{}'", files.len(), self.path);
        Ok(corpus)
    }
}
