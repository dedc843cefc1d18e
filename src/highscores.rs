//! Best score record
//!
//! A single all-time best is kept. Reads never fail (a missing or corrupt file
//! yields the default record) and writes are best-effort.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RECORD_NAME;
use crate::error::GameError;

/// The all-time best score and who set it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl Default for ScoreRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_RECORD_NAME.to_string(),
            score: 0,
        }
    }
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Whether `score` would replace this record
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.score
    }
}

/// Durable storage for the best score
pub trait ScoreStore {
    /// Read the stored record, substituting the default on any failure
    fn load(&mut self) -> ScoreRecord;

    /// Overwrite the stored record
    fn save(&mut self, record: &ScoreRecord) -> Result<(), GameError>;
}

/// Record kept as a JSON object on disk
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

    fn read(&self) -> Result<ScoreRecord, GameError> {
        let display = self.path.display().to_string();
        let json = fs::read_to_string(&self.path).map_err(|e| GameError::io(&display, e))?;
        serde_json::from_str(&json).map_err(|e| GameError::json(&display, e))
    }

    /// Sibling file written first and renamed over the record
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> ScoreRecord {
        if !self.path.exists() {
            log::info!("No top score found, starting fresh");
            return ScoreRecord::default();
        }
        match self.read() {
            Ok(record) => {
                log::info!("Loaded top score: {} - {}", record.name, record.score);
                record
            }
            Err(e) => {
                log::warn!("Could not load top score ({e}), starting fresh");
                ScoreRecord::default()
            }
        }
    }

    fn save(&mut self, record: &ScoreRecord) -> Result<(), GameError> {
        let json = serde_json::to_string(record)
            .map_err(|e| GameError::json(self.path.display().to_string(), e))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| GameError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| GameError::io(self.path.display().to_string(), e))?;
        log::info!("Top score saved: {} - {}", record.name, record.score);
        Ok(())
    }
}

/// In-process store, for tests and sessions without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub record: Option<ScoreRecord>,
    /// Every record passed to `save`, oldest first
    pub saves: Vec<ScoreRecord>,
    /// Make every `save` fail
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ScoreRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> ScoreRecord {
        self.record.clone().unwrap_or_default()
    }

    fn save(&mut self, record: &ScoreRecord) -> Result<(), GameError> {
        if self.fail_saves {
            return Err(GameError::io(
                "memory",
                std::io::Error::other("save disabled"),
            ));
        }
        self.saves.push(record.clone());
        self.record = Some(record.clone());
        Ok(())
    }
}
