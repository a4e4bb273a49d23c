use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One supervised example: padded article and question ids, the
/// inclusive answer span and the article's word-match flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanSample {
    pub article:     Vec<i64>,
    pub question:    Vec<i64>,
    pub answer_span: [i64; 2],
    pub word_match:  Vec<i64>,
}

impl SpanSample {
    pub fn span_length(&self) -> usize {
        (self.answer_span[1] - self.answer_span[0]).max(0) as usize + 1
    }

    /// Drop the label, e.g. for a validation fold.
    pub fn into_unlabeled(self) -> UnlabeledSample {
        UnlabeledSample {
            article:    self.article,
            question:   self.question,
            word_match: self.word_match,
        }
    }
}

/// An example without a gold span (validation and test sets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlabeledSample {
    pub article:    Vec<i64>,
    pub question:   Vec<i64>,
    pub word_match: Vec<i64>,
}

pub struct SpanDataset {
    samples: Vec<SpanSample>,
}

impl SpanDataset {
    pub fn new(samples: Vec<SpanSample>) -> Self { Self { samples } }
}

impl Dataset<SpanSample> for SpanDataset {
    fn get(&self, index: usize) -> Option<SpanSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

pub struct UnlabeledDataset {
    samples: Vec<UnlabeledSample>,
}

impl UnlabeledDataset {
    pub fn new(samples: Vec<UnlabeledSample>) -> Self { Self { samples } }
}

impl Dataset<UnlabeledSample> for UnlabeledDataset {
    fn get(&self, index: usize) -> Option<UnlabeledSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
