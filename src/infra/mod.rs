// ============================================================
// Layer 5: Infrastructure Layer
// ============================================================
// On-disk artifacts that surround the pipeline:
//
//   vocab_store.rs  : loads the word2idx / idx2word JSON pair
//                     into a Vocab
//
//   shuffle_store.rs: loads and saves the shuffle index that
//                     makes train/validation folds repeatable
//
//   report.rs       : JSON summary of a dataset build
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Vocabulary loading
pub mod vocab_store;

/// Shuffle index persistence
pub mod shuffle_store;

/// Build summary
pub mod report;
