//! JSON file backend for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BestScoreRecord, ScoreStore};
use crate::error::Result;

/// Stores the best score as `{"best_distance": N}` at `path`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for FileStore {
    fn load_best(&mut self) -> Result<u64> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let record = BestScoreRecord::from_json(&json)?;
                log::info!("Loaded best distance {} m from {}", record.best_distance, self.path.display());
                Ok(record.best_distance)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        let json = BestScoreRecord { best_distance: best }.to_json()?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        // Readers only ever see a complete record
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best distance {} m saved to {}", best, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("astrolab-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let mut store = FileStore::new(scratch("missing/best.json"));
        assert_eq!(store.load_best().expect("load"), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip/best.json");
        let mut store = FileStore::new(&path);
        store.save_best(321).expect("save");
        assert_eq!(FileStore::new(&path).load_best().expect("load"), 321);
        assert!(!store.tmp_path().exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch("corrupt/best.json");
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(&path, "not json").expect("write");
        let mut store = FileStore::new(&path);
        assert!(matches!(store.load_best(), Err(GameError::Serialization(_))));
        let _ = fs::remove_file(&path);
    }
}
