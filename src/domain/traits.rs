// ============================================================
// Layer 3: Core Traits
// ============================================================
// The application layer asks for articles through this trait
// and never touches file formats directly.
//
// Implementations:
//   - JsonCorpusLoader → a JSON array of articles on disk
//   - Vec<RawArticle>  → an in-memory corpus (tests, callers
//                        that already parsed the data)

use anyhow::Result;
use crate::domain::article::RawArticle;

/// Any component that can load the raw article corpus.
pub trait CorpusSource {
    fn load_all(&self) -> Result<Vec<RawArticle>>;
}

impl CorpusSource for Vec<RawArticle> {
    fn load_all(&self) -> Result<Vec<RawArticle>> {
        Ok(self.clone())
    }
}
