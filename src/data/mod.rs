// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between the raw corpus file and tensor batches:
//
//   corpus.json
//       │
//       ▼
//   JsonCorpusLoader  → parses the article array
//       │
//       ▼
//   ExampleBuilder    → one example per usable question
//       │               (Preprocessor: chars → pad → ids,
//       │                word-match feature)
//       ▼
//   splitter          → shuffle index, holdout fold
//       │
//       ▼
//   SpanDataset / UnlabeledDataset  → burn Dataset
//       │
//       ▼
//   SpanBatcher / UnlabeledBatcher  → Int tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the JSON corpus
pub mod loader;

/// Character tokenisation, padding, word-match
pub mod preprocessor;

/// Turns articles into labeled or test examples
pub mod builder;

/// burn Dataset implementations
pub mod dataset;

/// burn Batcher implementations
pub mod batcher;

/// Permutations and train/validation folds
pub mod splitter;
