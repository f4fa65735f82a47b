//! High score leaderboard
//!
//! Tracks the top 10 final scores. Persisted as JSON: a file on native,
//! LocalStorage on web.

use serde::{Deserialize, Serialize};

use crate::sim::SessionState;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Targets hit during the run
    #[serde(default)]
    pub hits: u32,
    /// Targets missed during the run
    #[serde(default)]
    pub misses: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ar_hoops_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry if it qualifies; returns the rank achieved (1-indexed)
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the older entry first
        let rank = match self.entries.iter().position(|e| entry.score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record the outcome of a finished session
    pub fn record_session(&mut self, state: &SessionState, timestamp: f64) -> Option<usize> {
        let rank = self.add(HighScoreEntry {
            score: state.score,
            hits: state.hits,
            misses: state.misses,
            timestamp,
        });
        if let Some(rank) = rank {
            log::info!("New high score #{}: {}", rank, state.score);
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Load high scores from a JSON file, starting fresh if missing or corrupt
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = std::fs::read_to_string(path) else {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Self::new();
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores
                    .entries
                    .sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Corrupt high scores {}: {}, starting fresh", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write high scores as JSON, replacing the file atomically
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a timestamp relative to `now` (both Unix ms)
pub fn format_relative(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 1000.0 / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        match diff_days.floor() as i64 {
            1 => "Yesterday".to_string(),
            days => format!("{} days ago", days),
        }
    } else if diff_hours >= 1.0 {
        match diff_hours.floor() as i64 {
            1 => "1 hour ago".to_string(),
            hours => format!("{} hours ago", hours),
        }
    } else if diff_mins >= 1.0 {
        match diff_mins.floor() as i64 {
            1 => "1 min ago".to_string(),
            mins => format!("{} mins ago", mins),
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            hits: score as u32,
            misses: 3,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry(5)), Some(1));
        assert_eq!(scores.add(entry(9)), Some(1));
        assert_eq!(scores.add(entry(7)), Some(2));
        assert_eq!(scores.add(entry(5)), Some(4));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add(entry(s * 10));
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add(entry(55)), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_record_session() {
        let mut state = SessionState::new();
        state.reset(3, 30);
        state.score = 12;
        state.hits = 12;
        state.misses = 3;
        let mut scores = HighScores::new();
        assert_eq!(scores.record_session(&state, 1000.0), Some(1));
        assert_eq!(scores.entries[0].hits, 12);
    }

    #[test]
    fn test_file_persistence() {
        let path =
            std::env::temp_dir().join(format!("ar_hoops_scores_{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add(entry(3));
        scores.add(entry(8));
        scores.save_to(&path).unwrap();

        let loaded = HighScores::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.entries, scores.entries);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path =
            std::env::temp_dir().join(format!("ar_hoops_corrupt_{}.json", std::process::id()));
        std::fs::write(&path, "[[[").unwrap();
        let loaded = HighScores::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_format_relative() {
        let min = 60_000.0;
        assert_eq!(format_relative(0.0, 30_000.0), "Just now");
        assert_eq!(format_relative(0.0, min), "1 min ago");
        assert_eq!(format_relative(0.0, 5.0 * min), "5 mins ago");
        assert_eq!(format_relative(0.0, 60.0 * min), "1 hour ago");
        assert_eq!(format_relative(0.0, 24.0 * 60.0 * min), "Yesterday");
        assert_eq!(format_relative(0.0, 3.0 * 24.0 * 60.0 * min), "3 days ago");
    }
}
