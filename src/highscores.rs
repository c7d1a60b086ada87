//! Session leaderboard
//!
//! Tracks the top 10 runs of the current process. Nothing is written to disk.

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Ticks survived
    pub ticks: u64,
    /// Seed the run was generated from
    pub seed: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank (1-indexed) a score would take, or None if it would fall off the board.
    ///
    /// Ties rank below the entries already there; zero never places.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.score >= score) + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Record a finished run, returning its rank if it placed
    pub fn add_score(&mut self, score: u64, ticks: u64, seed: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries
            .insert(rank - 1, HighScoreEntry { score, ticks, seed });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Score {} ranked #{} (seed {})", score, rank, seed);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
