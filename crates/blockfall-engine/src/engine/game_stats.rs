use crate::core::MAX_SHAPE_SIZE;

/// Statistics of the current game, tracking score and line clears.
///
/// Scoring is linear: every cleared line is worth the same number of points,
/// with no bonus for clearing several lines at once.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2, 100);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_SHAPE_SIZE + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_SHAPE_SIZE + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines they cleared.
    ///
    /// Index `n` counts locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_SHAPE_SIZE + 1] {
        &self.line_cleared_counter
    }

    /// Records a locked piece and returns the points it earned.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize, score_per_line: usize) -> usize {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        let points = cleared_lines * score_per_line;
        self.score += points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_linear() {
        for lines in 0..=4 {
            let mut stats = GameStats::new();
            let points = stats.complete_piece_drop(lines, 100);
            assert_eq!(points, 100 * lines);
            assert_eq!(stats.score(), 100 * lines);
        }
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0, 100);
        stats.complete_piece_drop(1, 100);
        stats.complete_piece_drop(4, 100);
        stats.complete_piece_drop(1, 100);
        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.score(), 600);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 0, 1]);
    }
}
