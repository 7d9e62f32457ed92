use serde::{Deserialize, Serialize};

use crate::round::RoomId;

/// Which score partition an award or leaderboard read targets.
///
/// The two partitions are independent and never merged: a win increments
/// the player's global entry and, when the win happened in a room, the
/// local entry for that room as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScope {
    Global,
    Local(RoomId),
}

/// Cumulative points for one player within one scope.
///
/// `display_name` is the last one seen for the player; every award
/// overwrites it. `score` only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub display_name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(display_name: String) -> Self {
        ScoreEntry {
            display_name,
            score: 0,
        }
    }
}

/// Solving within this many attempts earns the doubled award.
pub const BONUS_ATTEMPT_LIMIT: u32 = 3;

/// Points for a win beyond the bonus window.
pub const BASE_POINTS: u32 = 1;

/// Points for a win inside the bonus window.
pub const BONUS_POINTS: u32 = 2;

/// Whether a winning guess on this attempt number earns the bonus.
pub fn earns_bonus(attempt: u32) -> bool {
    attempt <= BONUS_ATTEMPT_LIMIT
}

/// Points a win is worth.
pub fn points_for(bonus: bool) -> u32 {
    if bonus { BONUS_POINTS } else { BASE_POINTS }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_window() {
        assert!(earns_bonus(1));
        assert!(earns_bonus(2));
        assert!(earns_bonus(3));
        assert!(!earns_bonus(4));
        assert!(!earns_bonus(10));
    }

    #[test]
    fn test_points() {
        assert_eq!(points_for(true), 2);
        assert_eq!(points_for(false), 1);
    }
}
