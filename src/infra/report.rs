// ============================================================
// Layer 5: Preparation Report
// ============================================================
// Summarises one dataset build: how many examples survived the
// filters, how they were split and batched, and the settings
// that produced them. Written as pretty JSON when requested.
//
// Example:
//   {
//     "config": { "train_file": "data/train.json", ... },
//     "vocab_size": 5021,
//     "total_examples": 14520,
//     "train_size": 13068,
//     "valid_size": 1452,
//     ...
//   }

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::build_use_case::BuildConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparationReport {
    pub config:            BuildConfig,
    pub vocab_size:        usize,
    pub articles:          usize,
    pub skipped_articles:  usize,
    pub skipped_questions: usize,
    pub total_examples:    usize,
    pub train_size:        usize,
    pub valid_size:        usize,
    pub train_batches:     usize,
    pub valid_batches:     usize,
}

impl PreparationReport {
    /// Number of batches a loader yields for `items` examples.
    pub fn batch_count(items: usize, batch_size: usize) -> usize {
        if batch_size == 0 { 0 } else { items.div_ceil(batch_size) }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;

        tracing::info!("Wrote preparation report to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_count_rounds_up() {
        assert_eq!(PreparationReport::batch_count(10, 4), 3);
        assert_eq!(PreparationReport::batch_count(8, 4), 2);
        assert_eq!(PreparationReport::batch_count(0, 4), 0);
    }

    #[test]
    fn test_save_writes_json() {
        let dir    = tempfile::tempdir().unwrap();
        let path   = dir.path().join("report.json");
        let report = PreparationReport {
            config:            BuildConfig::default(),
            vocab_size:        6,
            articles:          3,
            skipped_articles:  1,
            skipped_questions: 2,
            total_examples:    20,
            train_size:        18,
            valid_size:        2,
            train_batches:     1,
            valid_batches:     1,
        };

        report.save(&path).unwrap();
        let back: PreparationReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.train_size, 18);
        assert_eq!(back.config.max_article_len, BuildConfig::default().max_article_len);
    }
}
