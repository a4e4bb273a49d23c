// ============================================================
// Layer 2: BuildUseCase (train + validation)
// ============================================================
// Orchestrates the labeled pipeline in order:
//
//   Step 1: Load the corpus             (Layer 4 - data)
//   Step 2: Load the vocabulary         (Layer 5 - infra)
//   Step 3: Build labeled examples      (Layer 4 - data)
//   Step 4: Apply the shuffle index     (Layer 5 + 4)
//   Step 5: Hold out a validation fold  (Layer 4 - data)
//   Step 6: Wrap in datasets + loaders  (Layer 4 - data)
//   Step 7: Write the report            (Layer 5 - infra)
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{
    batcher::{SpanBatch, SpanBatcher, UnlabeledBatch, UnlabeledBatcher},
    builder::{ExampleBuilder, LabeledExample},
    dataset::{SpanDataset, SpanSample, UnlabeledDataset},
    loader::JsonCorpusLoader,
    preprocessor::Preprocessor,
    splitter::{apply_permutation, split_fold, validate_permutation, HoldoutFold},
};
use crate::domain::traits::CorpusSource;
use crate::infra::{
    report::PreparationReport,
    shuffle_store::ShuffleStore,
    vocab_store::VocabStore,
};

// ─── Build Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub train_file:       String,
    pub word2idx_path:    String,
    pub idx2word_path:    String,
    /// None keeps corpus order
    pub shuffle_idx_path: Option<String>,
    pub max_article_len:  usize,
    pub max_question_len: usize,
    pub batch_size:       usize,
    pub valid_batch_size: usize,
    pub with_valid:       bool,
    /// Which tenth of the shuffled examples to hold out
    pub model_id:         usize,
    pub report_path:      Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            train_file:       "data/train.json".to_string(),
            word2idx_path:    "data/word2idx.json".to_string(),
            idx2word_path:    "data/idx2word.json".to_string(),
            shuffle_idx_path: Some("data/shuffle_idx.json".to_string()),
            max_article_len:  500,
            max_question_len: 50,
            batch_size:       32,
            valid_batch_size: 32,
            with_valid:       false,
            model_id:         0,
            report_path:      None,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be at least 1");
        ensure!(self.valid_batch_size > 0, "valid_batch_size must be at least 1");
        ensure!(self.max_article_len > 0, "max_article_len must be at least 1");
        ensure!(self.max_question_len > 0, "max_question_len must be at least 1");
        Ok(())
    }
}

// ─── Output ──────────────────────────────────────────────────────────────────
/// Train and validation loaders with the raw text aligned to them.
pub struct TrainValidData<B: Backend> {
    pub train_loader:        Arc<dyn DataLoader<SpanBatch<B>>>,
    pub valid_loader:        Arc<dyn DataLoader<UnlabeledBatch<B>>>,
    pub train_raw_articles:  Vec<String>,
    pub train_raw_questions: Vec<String>,
    pub valid_raw_articles:  Vec<String>,
    pub valid_answers:       Vec<String>,
    pub valid_raw_questions: Vec<String>,
    pub report:              PreparationReport,
}

// ─── BuildUseCase ─────────────────────────────────────────────────────────────
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline on the configured corpus file.
    pub fn execute<B: Backend>(&self, device: &B::Device) -> Result<TrainValidData<B>> {
        let loader = JsonCorpusLoader::new(&self.config.train_file);
        self.execute_with(&loader, device)
    }

    pub fn execute_with<B: Backend>(
        &self,
        source: &dyn CorpusSource,
        device: &B::Device,
    ) -> Result<TrainValidData<B>> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Corpus ────────────────────────────────────────────────────
        let articles = source.load_all()?;

        // ── Step 2: Vocabulary ────────────────────────────────────────────────
        let vocab = VocabStore::new(&cfg.word2idx_path, &cfg.idx2word_path).load()?;

        // ── Step 3: Labeled examples ──────────────────────────────────────────
        let preprocessor = Preprocessor::new(cfg.max_article_len, cfg.max_question_len);
        let built = ExampleBuilder::new(preprocessor, &vocab).build_labeled(&articles);
        let total = built.examples.len();
        tracing::info!("Total size: {}", total);

        if let Some(first) = built.examples.first() {
            tracing::debug!(
                "First example question decodes to {:?}, answer spans {} chars",
                vocab.decode(&first.sample.question),
                first.sample.span_length(),
            );
        }

        // ── Step 4: Shuffle ───────────────────────────────────────────────────
        let examples = match &cfg.shuffle_idx_path {
            Some(path) => {
                let idx = ShuffleStore::new(path).load()?;
                validate_permutation(&idx, total)?;
                apply_permutation(built.examples, &idx)
            }
            None => {
                tracing::info!("No shuffle index configured; keeping corpus order");
                built.examples
            }
        };

        // ── Step 5: Holdout fold ──────────────────────────────────────────────
        let fold = HoldoutFold::new(total, cfg.model_id, cfg.with_valid)?;
        tracing::debug!(
            "Holdout fold {:?}: {} train / {} valid",
            fold.range,
            fold.train_len(),
            fold.valid_len(),
        );
        let (train, valid) = split_fold(examples, &fold);

        if cfg.with_valid && valid.is_empty() {
            tracing::warn!("Validation fold is empty ({} examples total)", total);
        }
        tracing::info!("Total train size: {}", train.len());
        tracing::info!("Total valid size: {}", valid.len());

        let report = PreparationReport {
            config:            cfg.clone(),
            vocab_size:        vocab.len(),
            articles:          articles.len(),
            skipped_articles:  built.skipped_articles,
            skipped_questions: built.skipped_questions,
            total_examples:    total,
            train_size:        train.len(),
            valid_size:        valid.len(),
            train_batches:     PreparationReport::batch_count(train.len(), cfg.batch_size),
            valid_batches:     PreparationReport::batch_count(valid.len(), cfg.valid_batch_size),
        };

        // ── Step 6: Datasets and loaders ──────────────────────────────────────
        let (train_samples, train_raw_articles, train_raw_questions, _) = unzip_examples(train);
        let (valid_samples, valid_raw_articles, valid_raw_questions, valid_answers) =
            unzip_examples(valid);

        let train_dataset = SpanDataset::new(train_samples);
        let valid_dataset = UnlabeledDataset::new(
            valid_samples.into_iter().map(|s| s.into_unlabeled()).collect(),
        );

        let train_loader = DataLoaderBuilder::new(SpanBatcher::<B>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .build(train_dataset);

        let valid_loader = DataLoaderBuilder::new(UnlabeledBatcher::<B>::new(device.clone()))
            .batch_size(cfg.valid_batch_size)
            .build(valid_dataset);

        tracing::info!("Data loaders built successfully");

        // ── Step 7: Report ────────────────────────────────────────────────────
        if let Some(path) = &cfg.report_path {
            report.save(path)?;
        }

        Ok(TrainValidData {
            train_loader,
            valid_loader,
            train_raw_articles,
            train_raw_questions,
            valid_raw_articles,
            valid_answers,
            valid_raw_questions,
            report,
        })
    }
}

/// Split examples into (samples, raw articles, raw questions, answers).
fn unzip_examples(
    examples: Vec<LabeledExample>,
) -> (Vec<SpanSample>, Vec<String>, Vec<String>, Vec<String>) {
    let mut samples   = Vec::with_capacity(examples.len());
    let mut articles  = Vec::with_capacity(examples.len());
    let mut questions = Vec::with_capacity(examples.len());
    let mut answers   = Vec::with_capacity(examples.len());

    for ex in examples {
        samples.push(ex.sample);
        articles.push(ex.raw_article);
        questions.push(ex.raw_question);
        answers.push(ex.answer);
    }
    (samples, articles, questions, answers)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{RawArticle, RawQuestion};
    use burn::backend::NdArray;
    use std::fs;
    use tempfile::TempDir;

    type TestBackend = NdArray;

    fn write_vocab(dir: &TempDir) -> (String, String) {
        let w2i = dir.path().join("word2idx.json");
        let i2w = dir.path().join("idx2word.json");
        fs::write(&w2i, r#"{"<UNK>": 0, "<PAD>": 1, "a": 2, "b": 3, "c": 4}"#).unwrap();
        fs::write(&i2w, r#"{"0": "<UNK>", "1": "<PAD>", "2": "a", "3": "b", "4": "c"}"#).unwrap();
        (w2i.display().to_string(), i2w.display().to_string())
    }

    /// `n` answerable questions, each tagged by its position in the
    /// question text so the order after shuffling can be checked.
    fn corpus(n: usize) -> Vec<RawArticle> {
        let questions = (0..n)
            .map(|i| RawQuestion {
                questions_id: None,
                question:     format!("q{i}"),
                answer:       "ab".to_string(),
                answer_span:  Some([0, 1]),
            })
            .collect();
        vec![RawArticle {
            article_id:      None,
            article_title:   None,
            article_content: "abcabc".to_string(),
            questions,
        }]
    }

    fn config(dir: &TempDir) -> BuildConfig {
        let (w2i, i2w) = write_vocab(dir);
        BuildConfig {
            train_file:       dir.path().join("unused.json").display().to_string(),
            word2idx_path:    w2i,
            idx2word_path:    i2w,
            shuffle_idx_path: None,
            max_article_len:  8,
            max_question_len: 4,
            batch_size:       4,
            valid_batch_size: 3,
            with_valid:       true,
            model_id:         1,
            report_path:      None,
        }
    }

    #[test]
    fn test_fold_sizes_and_raw_lists() {
        let dir  = tempfile::tempdir().unwrap();
        let data = BuildUseCase::new(config(&dir))
            .execute_with::<TestBackend>(&corpus(20), &Default::default())
            .unwrap();

        assert_eq!(data.report.total_examples, 20);
        assert_eq!(data.report.valid_size, 2);
        assert_eq!(data.report.train_size, 18);
        assert_eq!(data.valid_raw_questions, vec!["q2", "q3"]);
        assert_eq!(data.valid_answers, vec!["ab", "ab"]);
        assert_eq!(data.train_raw_questions[2], "q4");
        assert_eq!(data.train_raw_articles.len(), 18);
    }

    #[test]
    fn test_loaders_batch_in_order() {
        let dir  = tempfile::tempdir().unwrap();
        let data = BuildUseCase::new(config(&dir))
            .execute_with::<TestBackend>(&corpus(20), &Default::default())
            .unwrap();

        let train: Vec<_> = data.train_loader.iter().collect();
        assert_eq!(train.len(), 5);
        assert_eq!(train[0].article.dims(), [4, 8]);
        assert_eq!(train[0].question.dims(), [4, 4]);
        assert_eq!(train[0].answer_span.dims(), [4, 2]);
        assert_eq!(train[4].word_match.dims(), [2, 8]);

        let valid: Vec<_> = data.valid_loader.iter().collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].article.dims(), [2, 8]);
    }

    #[test]
    fn test_shuffle_index_reorders_examples() {
        let dir      = tempfile::tempdir().unwrap();
        let idx_path = dir.path().join("shuffle_idx.json");
        let idx: Vec<usize> = (0..20).rev().collect();
        ShuffleStore::new(&idx_path).save(&idx).unwrap();

        let mut cfg = config(&dir);
        cfg.shuffle_idx_path = Some(idx_path.display().to_string());
        cfg.with_valid = false;

        let data = BuildUseCase::new(cfg)
            .execute_with::<TestBackend>(&corpus(20), &Default::default())
            .unwrap();

        assert_eq!(data.train_raw_questions[0], "q19");
        assert_eq!(data.train_raw_questions[19], "q0");
        assert!(data.valid_raw_questions.is_empty());
        assert_eq!(data.valid_loader.iter().count(), 0);
    }

    #[test]
    fn test_shuffle_keeps_features_with_their_question() {
        let dir      = tempfile::tempdir().unwrap();
        let idx_path = dir.path().join("shuffle_idx.json");
        ShuffleStore::new(&idx_path).save(&[2, 0, 1]).unwrap();

        // One single-character question per vocab letter, so each example
        // has its own question ids, word-match row and span.
        let questions = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, q)| RawQuestion {
                questions_id: None,
                question:     q.to_string(),
                answer:       q.to_string(),
                answer_span:  Some([i as i64, i as i64]),
            })
            .collect();
        let articles = vec![RawArticle {
            article_id:      None,
            article_title:   None,
            article_content: "abcabc".to_string(),
            questions,
        }];

        let mut cfg = config(&dir);
        cfg.shuffle_idx_path = Some(idx_path.display().to_string());
        cfg.with_valid = false;

        let data = BuildUseCase::new(cfg)
            .execute_with::<TestBackend>(&articles, &Default::default())
            .unwrap();
        assert_eq!(data.train_raw_questions, vec!["c", "a", "b"]);

        let batch = data.train_loader.iter().next().unwrap();
        let question: Vec<i64> = batch.question.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(question, vec![4, 1, 1, 1, 2, 1, 1, 1, 3, 1, 1, 1]);

        let word_match: Vec<i64> = batch.word_match.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(
            word_match,
            vec![
                0, 0, 1, 0, 0, 1, 0, 0,
                1, 0, 0, 1, 0, 0, 0, 0,
                0, 1, 0, 0, 1, 0, 0, 0,
            ]
        );

        let spans: Vec<i64> = batch.answer_span.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(spans, vec![2, 2, 0, 0, 1, 1]);
    }

    #[test]
    fn test_stale_shuffle_index_is_rejected() {
        let dir      = tempfile::tempdir().unwrap();
        let idx_path = dir.path().join("shuffle_idx.json");
        ShuffleStore::new(&idx_path).save(&[0, 1, 2]).unwrap();

        let mut cfg = config(&dir);
        cfg.shuffle_idx_path = Some(idx_path.display().to_string());

        let result = BuildUseCase::new(cfg)
            .execute_with::<TestBackend>(&corpus(20), &Default::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_reads_corpus_file_and_writes_report() {
        let dir    = tempfile::tempdir().unwrap();
        let mut cfg = config(&dir);
        let corpus_path = dir.path().join("train.json");
        fs::write(&corpus_path, serde_json::to_string(&corpus(10)).unwrap()).unwrap();
        cfg.train_file  = corpus_path.display().to_string();
        cfg.report_path = Some(dir.path().join("out/report.json").display().to_string());

        let data = BuildUseCase::new(cfg)
            .execute::<TestBackend>(&Default::default())
            .unwrap();

        assert_eq!(data.report.total_examples, 10);
        assert!(dir.path().join("out/report.json").exists());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(&dir);
        cfg.batch_size = 0;
        assert!(BuildUseCase::new(cfg)
            .execute_with::<TestBackend>(&corpus(4), &Default::default())
            .is_err());
    }
}
