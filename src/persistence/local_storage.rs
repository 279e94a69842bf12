//! Browser LocalStorage backend (wasm32)

use super::{BestScoreRecord, ScoreStore};
use crate::error::{GameError, Result};

/// Stores the best score as JSON under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: &'static str,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self {
            key: Self::STORAGE_KEY,
        }
    }
}

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "astrolab_best";

    pub fn with_key(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| GameError::Storage("no window object".into()))?;
        window
            .local_storage()
            .map_err(|e| GameError::Storage(format!("LocalStorage unavailable: {e:?}")))?
            .ok_or_else(|| GameError::Storage("LocalStorage disabled".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best(&mut self) -> Result<u64> {
        let storage = Self::storage()?;
        let item = storage
            .get_item(self.key)
            .map_err(|e| GameError::Storage(format!("read failed: {e:?}")))?;
        match item {
            Some(json) => {
                let record = BestScoreRecord::from_json(&json)?;
                log::info!("Loaded best distance {} m", record.best_distance);
                Ok(record.best_distance)
            }
            None => {
                log::info!("No best score found, starting fresh");
                Ok(0)
            }
        }
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        let json = BestScoreRecord { best_distance: best }.to_json()?;
        Self::storage()?
            .set_item(self.key, &json)
            .map_err(|e| GameError::Storage(format!("write failed: {e:?}")))?;
        log::info!("Best distance {} m saved", best);
        Ok(())
    }
}
