// ============================================================
// Layer 4: Corpus Loader
// ============================================================
// Reads the raw question-answering corpus: one JSON file
// holding an array of articles (see domain::article for the
// record layout).
//
// Unlike record-level problems, which the example builder
// filters out, a missing or unparsable file is fatal and the
// error travels up to main with the path attached.
//
// Reference: serde_json::from_reader
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::domain::article::RawArticle;
use crate::domain::traits::CorpusSource;

/// Loads the article array from a JSON file.
pub struct JsonCorpusLoader {
    path: PathBuf,
}

impl JsonCorpusLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl CorpusSource for JsonCorpusLoader {
    fn load_all(&self) -> Result<Vec<RawArticle>> {
        tracing::info!("Loading corpus from '{}'", self.path.display());

        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let articles: Vec<RawArticle> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Cannot parse corpus '{}'", self.path.display()))?;

        let questions: usize = articles.iter().map(|a| a.questions.len()).sum();
        tracing::info!(
            "Loaded {} articles with {} questions",
            articles.len(),
            questions
        );
        Ok(articles)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_loads_article_array() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"[{{"article_id": 1, "article_content": "abc",
                 "questions": [{{"questions_id": 1, "question": "a?",
                                 "answer": "a", "answer_span": [0, 0]}}]}}]"#
        )
        .unwrap();

        let articles = JsonCorpusLoader::new(f.path()).load_all().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].questions[0].answer_span, Some([0, 0]));
    }

    #[test]
    fn test_null_title_is_accepted() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"[{{"article_id": 1, "article_title": null, "article_content": "a",
                 "questions": []}},
                {{"article_id": 2, "article_title": "Second", "article_content": "b"}}]"#
        )
        .unwrap();

        let articles = JsonCorpusLoader::new(f.path()).load_all().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].article_title, None);
        assert_eq!(articles[1].article_title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonCorpusLoader::new(dir.path().join("nope.json"))
            .load_all()
            .unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(JsonCorpusLoader::new(f.path()).load_all().is_err());
    }
}
