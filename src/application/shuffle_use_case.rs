// ============================================================
// Layer 2: ShuffleUseCase
// ============================================================
// Creates the shuffle index consumed by `build`:
//
//   Step 1: Load the training corpus
//   Step 2: Count the labeled examples it yields
//   Step 3: Draw a random permutation of that many indices
//   Step 4: Save it as JSON
//
// Only max_article_len matters for the count, because it
// decides which answer spans survive truncation. No vocabulary
// is needed.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{builder::count_labeled, loader::JsonCorpusLoader, splitter::random_permutation};
use crate::domain::traits::CorpusSource;
use crate::infra::shuffle_store::ShuffleStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleConfig {
    pub train_file:      String,
    pub max_article_len: usize,
    pub output:          String,
    pub seed:            Option<u64>,
}

pub struct ShuffleUseCase {
    config: ShuffleConfig,
}

impl ShuffleUseCase {
    pub fn new(config: ShuffleConfig) -> Self {
        Self { config }
    }

    /// Returns the number of indices written.
    pub fn execute(&self) -> Result<usize> {
        let loader = JsonCorpusLoader::new(&self.config.train_file);
        self.execute_with(&loader)
    }

    pub fn execute_with(&self, source: &dyn CorpusSource) -> Result<usize> {
        let cfg      = &self.config;
        let articles = source.load_all()?;
        let total    = count_labeled(&articles, cfg.max_article_len);

        let idx   = random_permutation(total, cfg.seed);
        let store = ShuffleStore::new(&cfg.output);
        store.save(&idx)?;

        tracing::info!(
            "Wrote shuffle index of {} entries to '{}'",
            total,
            store.path().display()
        );
        Ok(total)
    }
}
