// ============================================================
// Layer 3: Corpus Records
// ============================================================
// The raw corpus is a JSON array of articles. Each article
// carries its text and a list of question records:
//
//   {
//     "article_id": 7,
//     "article_title": "...",
//     "article_content": "...",
//     "questions": [
//       { "questions_id": "7_1", "question": "...",
//         "answer": "...", "answer_span": [12, 15] }
//     ]
//   }
//
// Test corpora omit `answer` and `answer_span`, so both are
// defaulted. A span endpoint of -1 means the annotator could
// not locate the answer in the article.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Article and question ids appear as integers in some dumps
/// and as strings in others; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n)  => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// One question attached to an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub questions_id: Option<RecordId>,

    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub answer: String,

    /// Inclusive character range `[start, end]` inside the article
    #[serde(default)]
    pub answer_span: Option<[i64; 2]>,
}

impl RawQuestion {
    /// True when the record can be used as a supervised example for
    /// articles truncated to `max_article_len` characters.
    pub fn is_answerable(&self, max_article_len: usize) -> bool {
        if self.question.is_empty() || self.answer.is_empty() {
            return false;
        }
        match self.answer_span {
            Some([start, end]) => {
                start != -1 && end != -1 && end < max_article_len as i64
            }
            None => false,
        }
    }
}

/// A passage of text with zero or more questions about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub article_id: Option<RecordId>,

    /// Informational only; some dumps carry `null` here.
    #[serde(default)]
    pub article_title: Option<String>,

    #[serde(default)]
    pub article_content: String,

    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(q: &str, a: &str, span: Option<[i64; 2]>) -> RawQuestion {
        RawQuestion {
            questions_id: None,
            question:     q.to_string(),
            answer:       a.to_string(),
            answer_span:  span,
        }
    }

    #[test]
    fn test_answerable_requires_text_and_span() {
        assert!(question("who?", "me", Some([0, 1])).is_answerable(10));
        assert!(!question("", "me", Some([0, 1])).is_answerable(10));
        assert!(!question("who?", "", Some([0, 1])).is_answerable(10));
        assert!(!question("who?", "me", None).is_answerable(10));
    }

    #[test]
    fn test_missing_span_marker_rejected() {
        assert!(!question("who?", "me", Some([-1, 3])).is_answerable(10));
        assert!(!question("who?", "me", Some([2, -1])).is_answerable(10));
    }

    #[test]
    fn test_span_must_end_inside_truncated_article() {
        assert!(question("who?", "me", Some([5, 9])).is_answerable(10));
        assert!(!question("who?", "me", Some([5, 10])).is_answerable(10));
    }

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let json = r#"[
            {"article_id": 3, "article_content": "abc",
             "questions": [{"questions_id": "3_a", "question": "b?"}]},
            {"article_id": "x9", "article_content": ""}
        ]"#;
        let articles: Vec<RawArticle> = serde_json::from_str(json).unwrap();

        assert_eq!(articles[0].article_id, Some(RecordId::Num(3)));
        assert_eq!(
            articles[0].questions[0].questions_id,
            Some(RecordId::Text("3_a".into()))
        );
        assert_eq!(articles[0].questions[0].answer, "");
        assert!(articles[1].questions.is_empty());
        assert_eq!(articles[1].article_id.as_ref().unwrap().to_string(), "x9");
    }
}
