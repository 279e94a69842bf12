//! Best-score persistence
//!
//! The game only ever persists one number. Backends:
//! - `MemoryStore`: in-process, optionally failing (tests, demos)
//! - `FileStore`: JSON file with tmp → save rotation (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Where the best distance is kept between sessions
pub trait ScoreStore {
    /// Read the stored best distance (0 when nothing was stored yet)
    fn load_best(&mut self) -> Result<u64>;
    /// Overwrite the stored best distance
    fn save_best(&mut self, best: u64) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_best(&mut self) -> Result<u64> {
        (**self).load_best()
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        (**self).save_best(best)
    }
}

/// On-disk / in-storage record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_distance: u64,
}

impl BestScoreRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Keeps the best score in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    saves: u32,
    fail_loads: bool,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored best
    pub fn with_best(best: u64) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    /// Make every load fail
    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    /// Make every save fail
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Last successfully saved (or initial) best
    pub fn stored_best(&self) -> u64 {
        self.best
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&mut self) -> Result<u64> {
        if self.fail_loads {
            return Err(GameError::Storage("memory store load disabled".into()));
        }
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        if self.fail_saves {
            return Err(GameError::Storage("memory store save disabled".into()));
        }
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}
