// ============================================================
// Layer 4: Batchers
// ============================================================
// Implements burn's Batcher trait so a DataLoader can stack
// fixed-length samples into Int tensors.
//
//   SpanBatcher:      Vec<SpanSample>      → SpanBatch
//   UnlabeledBatcher: Vec<UnlabeledSample> → UnlabeledBatch
//
// Every row is flattened into one Vec<i64> and reshaped:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// Samples are padded by the preprocessor, so all rows of a
// batch share one length and no dynamic padding happens here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::{SpanSample, UnlabeledSample};

/// Labeled batch. Shapes: article and word_match `[N, max_article_len]`,
/// question `[N, max_question_len]`, answer_span `[N, 2]`.
#[derive(Debug, Clone)]
pub struct SpanBatch<B: Backend> {
    pub article:     Tensor<B, 2, Int>,
    pub question:    Tensor<B, 2, Int>,
    pub answer_span: Tensor<B, 2, Int>,
    pub word_match:  Tensor<B, 2, Int>,
}

/// Batch for validation and test sets, without answer spans.
#[derive(Debug, Clone)]
pub struct UnlabeledBatch<B: Backend> {
    pub article:    Tensor<B, 2, Int>,
    pub question:   Tensor<B, 2, Int>,
    pub word_match: Tensor<B, 2, Int>,
}

/// Stack equal-length rows into a `[rows, width]` Int tensor.
fn stack_rows<'a, B: Backend>(
    rows:   impl Iterator<Item = &'a [i64]>,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let mut count = 0usize;
    let mut width = 0usize;
    let mut flat: Vec<i64> = Vec::new();

    for row in rows {
        width = row.len();
        flat.extend_from_slice(row);
        count += 1;
    }

    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device)
        .reshape([count, width])
}

#[derive(Clone, Debug)]
pub struct SpanBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SpanBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<SpanSample, SpanBatch<B>> for SpanBatcher<B> {
    fn batch(&self, items: Vec<SpanSample>) -> SpanBatch<B> {
        let article    = stack_rows::<B>(items.iter().map(|s| s.article.as_slice()), &self.device);
        let question   = stack_rows::<B>(items.iter().map(|s| s.question.as_slice()), &self.device);
        let word_match = stack_rows::<B>(items.iter().map(|s| s.word_match.as_slice()), &self.device);

        let answer_span = stack_rows::<B>(
            items.iter().map(|s| s.answer_span.as_slice()),
            &self.device,
        );

        SpanBatch { article, question, answer_span, word_match }
    }
}

#[derive(Clone, Debug)]
pub struct UnlabeledBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> UnlabeledBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<UnlabeledSample, UnlabeledBatch<B>> for UnlabeledBatcher<B> {
    fn batch(&self, items: Vec<UnlabeledSample>) -> UnlabeledBatch<B> {
        UnlabeledBatch {
            article:    stack_rows::<B>(items.iter().map(|s| s.article.as_slice()), &self.device),
            question:   stack_rows::<B>(items.iter().map(|s| s.question.as_slice()), &self.device),
            word_match: stack_rows::<B>(items.iter().map(|s| s.word_match.as_slice()), &self.device),
        }
    }
}
