// ============================================================
// Layer 5: Shuffle Index Store
// ============================================================
// Persists the permutation that orders labeled examples before
// the train/validation split, as a plain JSON array:
//
//   [17, 3, 42, 0, ...]
//
// The same file must be reused across runs (and across the
// models of an ensemble) so that every model agrees on which
// examples belong to which fold.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct ShuffleStore {
    path: PathBuf,
}

impl ShuffleStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, idx: &[usize]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        fs::write(&self.path, serde_json::to_string(idx)?)
            .with_context(|| format!("Cannot write shuffle index '{}'", self.path.display()))?;

        tracing::debug!("Saved {} shuffle indices to '{}'", idx.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<usize>> {
        tracing::info!("Loading shuffle index from '{}'", self.path.display());

        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read shuffle index '{}'. Run the `shuffle` command first \
                 or pass --no-shuffle.",
                self.path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse shuffle index '{}'", self.path.display()))
    }
}
