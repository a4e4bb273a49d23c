// ============================================================
// Layer 5: Vocabulary Store
// ============================================================
// Loads the character vocabulary from its two JSON files:
//
//   word2idx.json  {"<UNK>": 0, "<PAD>": 1, "的": 2, ...}
//   idx2word.json  {"0": "<UNK>", "1": "<PAD>", "2": "的", ...}
//
// JSON object keys are always strings, so idx2word keys are
// parsed back into integers here.

use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::domain::vocab::Vocab;

pub struct VocabStore {
    word2idx_path: PathBuf,
    idx2word_path: PathBuf,
}

impl VocabStore {
    pub fn new(word2idx_path: impl AsRef<Path>, idx2word_path: impl AsRef<Path>) -> Self {
        Self {
            word2idx_path: word2idx_path.as_ref().to_path_buf(),
            idx2word_path: idx2word_path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<Vocab> {
        let word2idx: HashMap<String, i64> = read_json(&self.word2idx_path)?;
        let raw_idx2word: HashMap<String, String> = read_json(&self.idx2word_path)?;

        let idx2word = raw_idx2word
            .into_iter()
            .map(|(k, v)| {
                k.parse::<i64>()
                    .map(|idx| (idx, v))
                    .with_context(|| {
                        format!(
                            "Non-integer key '{}' in '{}'",
                            k,
                            self.idx2word_path.display()
                        )
                    })
            })
            .collect::<Result<HashMap<i64, String>>>()?;

        let vocab = Vocab::new(word2idx, idx2word);
        tracing::info!("Word vocab size: {}", vocab.len());
        if vocab.is_empty() {
            tracing::warn!(
                "Vocabulary '{}' is empty; every token will encode as 0",
                self.word2idx_path.display()
            );
        }
        Ok(vocab)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open vocabulary file '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse vocabulary file '{}'", path.display()))
}
