// ============================================================
// Layer 2: TestUseCase
// ============================================================
// Prepares an unlabeled test corpus:
//
//   Step 1: Load the corpus
//   Step 2: Load the vocabulary
//   Step 3: Build one example per question (nothing skipped)
//   Step 4: Wrap in a dataset + loader
//
// The article / question ids travel alongside the loader so
// predictions can be written back against the right records.

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{
    batcher::{UnlabeledBatch, UnlabeledBatcher},
    builder::ExampleBuilder,
    dataset::UnlabeledDataset,
    loader::JsonCorpusLoader,
    preprocessor::Preprocessor,
};
use crate::domain::article::RecordId;
use crate::domain::traits::CorpusSource;
use crate::infra::vocab_store::VocabStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub test_file:        String,
    pub word2idx_path:    String,
    pub idx2word_path:    String,
    pub max_article_len:  usize,
    pub max_question_len: usize,
    pub batch_size:       usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            test_file:        "data/test.json".to_string(),
            word2idx_path:    "data/word2idx.json".to_string(),
            idx2word_path:    "data/idx2word.json".to_string(),
            max_article_len:  500,
            max_question_len: 50,
            batch_size:       32,
        }
    }
}

pub struct TestData<B: Backend> {
    pub test_loader:  Arc<dyn DataLoader<UnlabeledBatch<B>>>,
    pub raw_articles: Vec<String>,
    pub article_ids:  Vec<Option<RecordId>>,
    pub question_ids: Vec<Option<RecordId>>,
}

impl<B: Backend> TestData<B> {
    pub fn len(&self) -> usize {
        self.raw_articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_articles.is_empty()
    }
}

pub struct TestUseCase {
    config: TestConfig,
}

impl TestUseCase {
    pub fn new(config: TestConfig) -> Self {
        Self { config }
    }

    pub fn execute<B: Backend>(&self, device: &B::Device) -> Result<TestData<B>> {
        let loader = JsonCorpusLoader::new(&self.config.test_file);
        self.execute_with(&loader, device)
    }

    pub fn execute_with<B: Backend>(
        &self,
        source: &dyn CorpusSource,
        device: &B::Device,
    ) -> Result<TestData<B>> {
        let cfg = &self.config;
        ensure!(cfg.batch_size > 0, "batch_size must be at least 1");

        let articles = source.load_all()?;
        let vocab    = VocabStore::new(&cfg.word2idx_path, &cfg.idx2word_path).load()?;

        let preprocessor = Preprocessor::new(cfg.max_article_len, cfg.max_question_len);
        let examples = ExampleBuilder::new(preprocessor, &vocab).build_unlabeled(&articles);

        let mut samples      = Vec::with_capacity(examples.len());
        let mut raw_articles = Vec::with_capacity(examples.len());
        let mut article_ids  = Vec::with_capacity(examples.len());
        let mut question_ids = Vec::with_capacity(examples.len());

        for ex in examples {
            samples.push(ex.sample);
            raw_articles.push(ex.raw_article);
            article_ids.push(ex.article_id);
            question_ids.push(ex.question_id);
        }

        let missing_ids = question_ids.iter().filter(|id| id.is_none()).count();
        if missing_ids > 0 {
            tracing::warn!("{} test questions have no questions_id", missing_ids);
        }
        tracing::info!("Total test size: {}", samples.len());

        let test_loader = DataLoaderBuilder::new(UnlabeledBatcher::<B>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .build(UnlabeledDataset::new(samples));

        tracing::info!("Test loader built successfully");

        Ok(TestData { test_loader, raw_articles, article_ids, question_ids })
    }
}
