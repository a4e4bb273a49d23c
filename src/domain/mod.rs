// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain records and traits describing the corpus and the
// vocabulary. No burn types and no file I/O live here.

// Articles, questions and their ids as they appear in the corpus
pub mod article;

// Character vocabulary (word2idx / idx2word)
pub mod vocab;

// Abstractions implemented by the data layer
pub mod traits;
