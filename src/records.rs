//! Per-level best attempts
//!
//! Fewer attempts is better. Serializable so a host can keep it wherever it
//! likes (browser storage, a file, a remote table).

use serde::{Deserialize, Serialize};

/// Best result on one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub level: u32,
    /// Fewest launches needed to reach the goal
    pub attempts: u32,
}

/// Best-attempt records, sorted by level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecords {
    pub entries: Vec<LevelRecord>,
}

impl LevelRecords {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a win; returns true if it's a new best for the level
    pub fn record(&mut self, level: u32, attempts: u32) -> bool {
        if attempts == 0 {
            return false;
        }

        match self.entries.binary_search_by_key(&level, |e| e.level) {
            Ok(i) => {
                if attempts < self.entries[i].attempts {
                    self.entries[i].attempts = attempts;
                    log::info!("New best for level {}: {} attempt(s)", level, attempts);
                    true
                } else {
                    false
                }
            }
            Err(i) => {
                self.entries.insert(i, LevelRecord { level, attempts });
                true
            }
        }
    }

    /// Best attempts for a level, if it has been cleared
    pub fn best(&self, level: u32) -> Option<u32> {
        self.entries
            .binary_search_by_key(&level, |e| e.level)
            .ok()
            .map(|i| self.entries[i].attempts)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct levels cleared
    pub fn levels_cleared(&self) -> usize {
        self.entries.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut records: Self = serde_json::from_str(json)?;
        // Fewest attempts first within a level so dedup keeps the best
        records.entries.sort_by_key(|e| (e.level, e.attempts));
        records.entries.dedup_by_key(|e| e.level);
        Ok(records)
    }
}
