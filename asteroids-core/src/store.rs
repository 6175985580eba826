use std::collections::HashMap;

use crate::error::StoreError;

/// Persistence for the best score across sessions.
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn load_best_score(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn save_best_score(&mut self, key: &str, score: u32) -> Result<(), StoreError>;
}

/// Process-local store, used by default and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    entries: HashMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, score: u32) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), score);
        store
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.get(key))
    }

    fn save_best_score(&mut self, key: &str, score: u32) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), score);
        Ok(())
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load_best_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).load_best_score(key)
    }

    fn save_best_score(&mut self, key: &str, score: u32) -> Result<(), StoreError> {
        (**self).save_best_score(key, score)
    }
}
