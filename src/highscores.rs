//! Best score per level
//!
//! Persisted to LocalStorage alongside the settings.

use serde::{Deserialize, Serialize};

use crate::sim::CharacterId;

/// Best run on one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestEntry {
    /// Level number as shown to the player (1-based)
    pub level: u8,
    pub score: u64,
    /// Who set it
    pub character: CharacterId,
}

/// Best scores, one entry per level, sorted by level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub entries: Vec<BestEntry>,
    /// Level whose entry was set by the most recent `record` call
    #[serde(skip)]
    fresh: Option<u8>,
}

impl BestScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "trojan_christmas_best";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self, level: u8) -> Option<&BestEntry> {
        self.entries.iter().find(|e| e.level == level)
    }

    /// Record a finished level; returns true if it is a new best
    pub fn record(&mut self, level: u8, score: u64, character: CharacterId) -> bool {
        let entry = BestEntry {
            level,
            score,
            character,
        };
        let improved = match self.entries.iter_mut().find(|e| e.level == level) {
            Some(best) if score > best.score => {
                *best = entry;
                true
            }
            Some(_) => false,
            None => {
                let pos = self
                    .entries
                    .iter()
                    .position(|e| e.level > level)
                    .unwrap_or(self.entries.len());
                self.entries.insert(pos, entry);
                true
            }
        };
        self.fresh = improved.then_some(level);
        improved
    }

    /// Whether `score` on `level` is the best so far. A tie with an older
    /// best is not new.
    pub fn is_new_best(&self, level: u8, score: u64) -> bool {
        match self.best(level) {
            None => true,
            Some(best) => self.fresh == Some(level) && best.score == score,
        }
    }

    /// Load best scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(scores) = serde_json::from_str::<BestScores>(&json)
        {
            log::info!("Loaded best scores for {} levels", scores.entries.len());
            return scores;
        }

        log::info!("No best scores found, starting fresh");
        Self::new()
    }

    /// Save best scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Best scores saved ({} levels)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_score_is_best() {
        let mut scores = BestScores::new();
        assert!(scores.best(1).is_none());
        assert!(scores.record(1, 900, CharacterId(3)));
        let best = scores.best(1).copied();
        assert_eq!(best.map(|b| b.score), Some(900));
        assert_eq!(best.map(|b| b.character), Some(CharacterId(3)));
    }

    #[test]
    fn test_only_higher_replaces() {
        let mut scores = BestScores::new();
        scores.record(1, 900, CharacterId(0));
        assert!(!scores.record(1, 900, CharacterId(1)));
        assert!(!scores.record(1, 100, CharacterId(1)));
        assert!(scores.record(1, 901, CharacterId(2)));
        assert_eq!(scores.best(1).map(|b| b.character), Some(CharacterId(2)));
        assert_eq!(scores.entries.len(), 1);
    }

    #[test]
    fn test_entries_sorted_by_level() {
        let mut scores = BestScores::new();
        scores.record(2, 50, CharacterId(0));
        scores.record(1, 70, CharacterId(0));
        let levels: Vec<_> = scores.entries.iter().map(|e| e.level).collect();
        assert_eq!(levels, [1, 2]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut scores = BestScores::new();
        scores.record(1, 1234, CharacterId(5));
        let json = serde_json::to_string(&scores).unwrap_or_default();
        let back: BestScores = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back.entries, scores.entries);
    }

    #[test]
    fn test_tie_is_not_new_best() {
        let mut scores = BestScores::new();
        assert!(scores.is_new_best(1, 500));
        scores.record(1, 500, CharacterId(0));
        assert!(scores.is_new_best(1, 500));

        assert!(!scores.record(1, 500, CharacterId(1)));
        assert!(!scores.is_new_best(1, 500));
        assert!(!scores.is_new_best(1, 300));

        scores.record(1, 501, CharacterId(1));
        assert!(scores.is_new_best(1, 501));
        // A later record on another level takes the flag
        scores.record(2, 10, CharacterId(1));
        assert!(!scores.is_new_best(1, 501));
        assert!(scores.is_new_best(2, 10));
    }
}
