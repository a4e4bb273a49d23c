// ============================================================
// Layer 4: Character Preprocessor
// ============================================================
// Turns raw article and question text into fixed-length id
// sequences for the model.
//
// Steps for each text:
//   1. Split into characters (Unicode scalar values)
//   2. Truncate to the configured length, or right-pad with <PAD>
//   3. Look each token up in the vocabulary (unknown → 0)
//
// It also computes the word-match feature: for every article
// character, 1 if the same character occurs anywhere in the
// question and 0 otherwise, padded with 0 to the article length.
//
// Example (max_article_len = 6):
//   article:  "abcab"
//   question: "bz"
//   match:    [0, 1, 0, 0, 1, 0]
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use std::collections::HashSet;

use crate::domain::vocab::Vocab;

#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    pub max_article_len:  usize,
    pub max_question_len: usize,
}

impl Preprocessor {
    pub fn new(max_article_len: usize, max_question_len: usize) -> Self {
        Self { max_article_len, max_question_len }
    }

    /// Character-level tokenisation.
    pub fn tokenize(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    /// Truncate `seq` to `len` items or right-pad it with `pad`.
    pub fn fit<T: Clone>(mut seq: Vec<T>, len: usize, pad: T) -> Vec<T> {
        seq.truncate(len);
        seq.resize(len, pad);
        seq
    }

    pub fn encode_article(&self, text: &str, vocab: &Vocab) -> Vec<i64> {
        vocab.encode_padded(&Self::tokenize(text), self.max_article_len)
    }

    pub fn encode_question(&self, text: &str, vocab: &Vocab) -> Vec<i64> {
        vocab.encode_padded(&Self::tokenize(text), self.max_question_len)
    }

    pub fn word_match(&self, article: &str, question: &str) -> Vec<i64> {
        let in_question: HashSet<char> = question.chars().collect();
        let flags: Vec<i64> = article
            .chars()
            .take(self.max_article_len)
            .map(|c| i64::from(in_question.contains(&c)))
            .collect();
        Self::fit(flags, self.max_article_len, 0)
    }

    /// The article text the model actually sees, without padding.
    pub fn raw_article(&self, text: &str) -> String {
        text.chars().take(self.max_article_len).collect()
    }
}
