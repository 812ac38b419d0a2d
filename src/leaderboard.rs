//! Run leaderboard
//!
//! Keeps the best finished runs ranked by score. Entries carry the full
//! [`GameResult`] so the same record the engine emits is what gets ranked.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::GameResult;

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 20;

/// A single ranked run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(flatten)]
    pub result: GameResult,
}

/// Best runs, sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.result.score)
    }

    /// Rank a score would take (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(self.insertion_point(score) + 1)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify. Ties rank below earlier submissions.
    pub fn submit(&mut self, name: impl Into<String>, result: GameResult) -> Option<usize> {
        if !self.qualifies(result.score) {
            return None;
        }
        let index = self.insertion_point(result.score);
        self.entries.insert(
            index,
            LeaderboardEntry {
                name: name.into(),
                result,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        log::debug!("Leaderboard: {} points at rank {}", result.score, index + 1);
        Some(index + 1)
    }

    fn insertion_point(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.result.score)
            .unwrap_or(self.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.result.score)
    }

    /// Parse a saved board, re-ranking and trimming whatever was stored
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut board: Self = serde_json::from_str(json)?;
        // Stable sort keeps tie order
        board
            .entries
            .sort_by(|a, b| b.result.score.cmp(&a.result.score));
        board.entries.truncate(MAX_ENTRIES);
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64) -> GameResult {
        GameResult {
            score,
            phase: 1,
            time: 30,
            powerups_collected: 0,
            hits_received: 0,
            enemies_destroyed: 0,
            boss_damage_dealt: 0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.potential_rank(0), None);
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_submit_ranks_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("a", run(500)), Some(1));
        assert_eq!(board.submit("b", run(900)), Some(1));
        assert_eq!(board.submit("c", run(700)), Some(2));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.result.score).collect();
        assert_eq!(scores, vec![900, 700, 500]);
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new();
        board.submit("first", run(400));
        assert_eq!(board.potential_rank(400), Some(2));
        assert_eq!(board.submit("second", run(400)), Some(2));
        assert_eq!(board.entries[0].name, "first");
    }

    #[test]
    fn test_full_board_trims_to_capacity() {
        let mut board = Leaderboard::new();
        for score in 1..=MAX_ENTRIES as u64 {
            board.submit("p", run(score * 100));
        }
        assert_eq!(board.len(), MAX_ENTRIES);

        // Ties with the lowest entry don't make it
        assert!(!board.qualifies(100));
        assert_eq!(board.submit("late", run(100)), None);

        assert_eq!(board.submit("late", run(150)), Some(MAX_ENTRIES));
        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().unwrap().result.score, 150);
    }

    #[test]
    fn test_json_flattens_result() {
        let mut board = Leaderboard::new();
        board.submit("ace", run(1200));
        let json = board.to_json().unwrap();
        assert!(json.contains("\"hitsReceived\""));

        let restored = Leaderboard::from_json(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_from_json_reranks() {
        let json = r#"{ "entries": [
            { "name": "low", "score": 10, "phase": 1, "time": 5, "powerupsCollected": 0,
              "hitsReceived": 3, "enemiesDestroyed": 1, "bossDamageDealt": 0 },
            { "name": "high", "score": 99, "phase": 2, "time": 50, "powerupsCollected": 2,
              "hitsReceived": 1, "enemiesDestroyed": 9, "bossDamageDealt": 40 }
        ] }"#;
        let board = Leaderboard::from_json(json).unwrap();
        assert_eq!(board.entries[0].name, "high");
        assert_eq!(board.top_score(), Some(99));
    }
}
