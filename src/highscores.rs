//! Persisted best score
//!
//! A single integer that survives power cycles. On the device this would be
//! a flash preferences key; natively it is a small JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score I/O: {0}")]
    Io(#[from] io::Error),

    #[error("high score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Read/write access to the persisted high score
pub trait HighScoreStore {
    /// Stored best score, 0 when nothing has been saved yet
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk shape of the score file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u32,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self { score, saves: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}

/// `{"high_score": N}` in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", record.high_score);
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brickfall-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(120).unwrap();
        assert_eq!(store.load().unwrap(), 120);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_persists() {
        let path = temp_path("persist");
        let mut store = JsonFileStore::new(&path);
        store.save(340).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), 340);
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"high_score":340}"#);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_path("malformed");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));
        let _ = fs::remove_file(path);
    }
}
