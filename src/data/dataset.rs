use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One training sample: a fixed-length context window and the id of
/// the token that immediately follows it in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenWindow {
    pub context: Vec<usize>,
    pub target:  usize,
}

pub struct WindowDataset {
    windows: Vec<TokenWindow>,
}

impl WindowDataset {
    pub fn new(windows: Vec<TokenWindow>) -> Self {
        Self { windows }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl Dataset<TokenWindow> for WindowDataset {
    fn get(&self, index: usize) -> Option<TokenWindow> {
        self.windows.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_get() {
        let ds = WindowDataset::new(vec![
            TokenWindow { context: vec![1, 2], target: 3 },
            TokenWindow { context: vec![2, 3], target: 4 },
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().target, 4);
        assert!(ds.get(2).is_none());
    }
}
