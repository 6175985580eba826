use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use neon_asteroids_core::{ScoreStore, StoreError};

/// Best scores persisted as a flat JSON object, `{ "<key>": <score> }`.
#[derive(Clone, Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self, key: &str) -> Result<BTreeMap<String, u32>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(StoreError::unavailable(format!(
                    "failed reading {}: {err}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|err| StoreError::corrupt(key, err.to_string()))
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load_best_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_entries(key)?.get(key).copied())
    }

    fn save_best_score(&mut self, key: &str, score: u32) -> Result<(), StoreError> {
        let mut entries = match self.read_entries(key) {
            Ok(entries) => entries,
            Err(err @ StoreError::Corrupt { .. }) => {
                tracing::warn!("replacing unreadable score file {}: {err}", self.path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), score);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    StoreError::unavailable(format!("failed creating {}: {err}", parent.display()))
                })?;
            }
        }

        let encoded = serde_json::to_vec_pretty(&entries)
            .map_err(|err| StoreError::unavailable(format!("failed encoding scores: {err}")))?;
        fs::write(&self.path, encoded).map_err(|err| {
            StoreError::unavailable(format!("failed writing {}: {err}", self.path.display()))
        })
    }
}
