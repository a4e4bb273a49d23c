// ============================================================
// Layer 4: Example Builder
// ============================================================
// Expands each article into one example per question:
//
//   article ──┬── question 1 → (article ids, question ids, span, match)
//             ├── question 2 → ...
//             └── ...
//
// Labeled builds (train / validation) drop records that cannot
// supervise a span model:
//   - articles with empty content
//   - questions with an empty question or answer text
//   - spans missing or marked with -1
//   - spans ending at or beyond max_article_len (the answer was
//     truncated away)
//
// Test builds keep every article, even empty ones, and every
// question, since each one needs a prediction.
//
// Each example keeps its raw text next to the encoded sample so
// that a later shuffle or split moves both together.

use crate::data::dataset::{SpanSample, UnlabeledSample};
use crate::data::preprocessor::Preprocessor;
use crate::domain::article::{RawArticle, RecordId};
use crate::domain::vocab::Vocab;

/// A supervised example plus the text it was built from.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    pub sample:       SpanSample,
    pub answer:       String,
    /// Article text truncated to max_article_len characters
    pub raw_article:  String,
    pub raw_question: String,
}

#[derive(Debug, Default)]
pub struct LabeledCorpus {
    pub examples:          Vec<LabeledExample>,
    pub skipped_articles:  usize,
    pub skipped_questions: usize,
}

/// A test example plus the ids needed to report its prediction.
#[derive(Debug, Clone)]
pub struct TestExample {
    pub sample:      UnlabeledSample,
    pub raw_article: String,
    pub article_id:  Option<RecordId>,
    pub question_id: Option<RecordId>,
}

pub struct ExampleBuilder<'a> {
    preprocessor: Preprocessor,
    vocab:        &'a Vocab,
}

impl<'a> ExampleBuilder<'a> {
    pub fn new(preprocessor: Preprocessor, vocab: &'a Vocab) -> Self {
        Self { preprocessor, vocab }
    }

    pub fn build_labeled(&self, articles: &[RawArticle]) -> LabeledCorpus {
        let p = &self.preprocessor;
        let mut corpus = LabeledCorpus::default();

        for article in articles {
            let content = &article.article_content;
            if content.is_empty() {
                corpus.skipped_articles += 1;
                continue;
            }

            let article_ids = p.encode_article(content, self.vocab);
            let raw_article = p.raw_article(content);

            for qa in &article.questions {
                let Some(span) = qa.answer_span.filter(|_| qa.is_answerable(p.max_article_len)) else {
                    corpus.skipped_questions += 1;
                    continue;
                };

                corpus.examples.push(LabeledExample {
                    sample: SpanSample {
                        article:     article_ids.clone(),
                        question:    p.encode_question(&qa.question, self.vocab),
                        answer_span: span,
                        word_match:  p.word_match(content, &qa.question),
                    },
                    answer:       qa.answer.clone(),
                    raw_article:  raw_article.clone(),
                    raw_question: qa.question.clone(),
                });
            }
        }

        tracing::info!(
            "Built {} labeled examples ({} empty articles, {} unusable questions skipped)",
            corpus.examples.len(),
            corpus.skipped_articles,
            corpus.skipped_questions,
        );
        corpus
    }

    pub fn build_unlabeled(&self, articles: &[RawArticle]) -> Vec<TestExample> {
        let p = &self.preprocessor;
        let mut examples = Vec::new();

        for article in articles {
            let content     = &article.article_content;
            let article_ids = p.encode_article(content, self.vocab);
            let raw_article = p.raw_article(content);

            for qa in &article.questions {
                examples.push(TestExample {
                    sample: UnlabeledSample {
                        article:    article_ids.clone(),
                        question:   p.encode_question(&qa.question, self.vocab),
                        word_match: p.word_match(content, &qa.question),
                    },
                    raw_article: raw_article.clone(),
                    article_id:  article.article_id.clone(),
                    question_id: qa.questions_id.clone(),
                });
            }
        }

        tracing::info!("Built {} test examples from {} articles", examples.len(), articles.len());
        examples
    }
}

/// Number of labeled examples `build_labeled` would produce, without
/// encoding anything. Used to size a fresh shuffle index.
pub fn count_labeled(articles: &[RawArticle], max_article_len: usize) -> usize {
    articles
        .iter()
        .filter(|a| !a.article_content.is_empty())
        .flat_map(|a| &a.questions)
        .filter(|qa| qa.is_answerable(max_article_len))
        .count()
}
