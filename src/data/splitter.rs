// ============================================================
// Layer 4: Shuffle and Holdout Split
// ============================================================
// Labeled examples are reordered by a stored permutation (the
// shuffle index) and then cut into train and validation sets.
//
// Storing the permutation instead of reshuffling every run
// keeps the split reproducible, so several models can each
// hold out a different tenth of the same ordering:
//
//   valid_size = total / 10
//   model_id k → validation = [k * valid_size, (k + 1) * valid_size)
//                training   = everything else, order preserved
//
// Without validation the fold is empty and all examples train.
//
// The permutation itself is generated with a Fisher-Yates
// shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use anyhow::{bail, ensure, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::ops::Range;

/// Number of folds the labeled examples are divided into.
pub const FOLDS: usize = 10;

/// Random permutation of `0..n`. A seed makes the result repeatable.
pub fn random_permutation(n: usize, seed: Option<u64>) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..n).collect();
    match seed {
        Some(seed) => idx.shuffle(&mut StdRng::seed_from_u64(seed)),
        None       => idx.shuffle(&mut rand::thread_rng()),
    }
    idx
}

/// Check that `idx` is a permutation of `0..len`.
pub fn validate_permutation(idx: &[usize], len: usize) -> Result<()> {
    ensure!(
        idx.len() == len,
        "shuffle index has {} entries but the corpus produced {} examples; \
         regenerate it with the `shuffle` command",
        idx.len(),
        len
    );

    let mut seen = vec![false; len];
    for &i in idx {
        if i >= len {
            bail!("shuffle index entry {i} is out of range for {len} examples");
        }
        if seen[i] {
            bail!("shuffle index repeats entry {i}");
        }
        seen[i] = true;
    }
    Ok(())
}

/// Reorder `items` so position `k` holds `items[idx[k]]`.
/// `idx` must already be validated against `items.len()`.
pub fn apply_permutation<T>(items: Vec<T>, idx: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    idx.iter().filter_map(|&i| slots[i].take()).collect()
}

/// The `[begin, end)` range of examples held out for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutFold {
    pub total: usize,
    pub range: Range<usize>,
}

impl HoldoutFold {
    pub fn new(total: usize, model_id: usize, with_valid: bool) -> Result<Self> {
        if !with_valid {
            return Ok(Self { total, range: total..total });
        }

        ensure!(
            model_id < FOLDS,
            "model_id {model_id} selects a validation fold outside {total} examples \
             (expected 0..{FOLDS})"
        );

        let valid_size = total / FOLDS;
        let begin      = model_id * valid_size;
        let end        = begin + valid_size;

        ensure!(
            end <= total,
            "model_id {model_id} selects a validation fold outside {total} examples \
             (expected 0..{FOLDS})"
        );

        Ok(Self { total, range: begin..end })
    }

    pub fn valid_len(&self) -> usize {
        self.range.len()
    }

    pub fn train_len(&self) -> usize {
        self.total - self.range.len()
    }
}

/// Split `items` into (train, valid) around the fold, keeping order.
pub fn split_fold<T>(mut items: Vec<T>, fold: &HoldoutFold) -> (Vec<T>, Vec<T>) {
    let tail  = items.split_off(fold.range.end.min(items.len()));
    let valid = items.split_off(fold.range.start.min(items.len()));
    items.extend(tail);

    tracing::debug!(
        "Fold {:?}: {} training, {} validation",
        fold.range,
        items.len(),
        valid.len(),
    );

    (items, valid)
}
