use quiz_types::{PlayerId, ScoreEntry};

/// Entries shown before the requester's own out-of-top line.
pub const LEADERBOARD_SIZE: usize = 10;

/// One rendered leaderboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub rank: usize, // 1-based
    pub player: PlayerId,
    pub display_name: String,
    pub score: u32,
}

/// A scope's ranked view: the top entries plus the requester's own line
/// when they scored but fell outside the top.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeaderboardView {
    pub top: Vec<RankedEntry>,
    pub requester: Option<RankedEntry>,
}

/// Rank a scope's entries by descending score.
///
/// The sort is stable, so equal scores keep the order the store returned
/// them in. An empty scope yields an empty view.
pub fn rank(mut entries: Vec<(PlayerId, ScoreEntry)>, requester: PlayerId) -> LeaderboardView {
    entries.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    let top = entries
        .iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(index, (player, entry))| RankedEntry {
            rank: index + 1,
            player: *player,
            display_name: entry.display_name.clone(),
            score: entry.score,
        })
        .collect();

    let requester = entries
        .iter()
        .enumerate()
        .skip(LEADERBOARD_SIZE)
        .find(|(_, (player, _))| *player == requester)
        .map(|(index, (player, entry))| RankedEntry {
            rank: index + 1,
            player: *player,
            display_name: entry.display_name.clone(),
            score: entry.score,
        });

    LeaderboardView { top, requester }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            display_name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_empty_scope_yields_empty_view() {
        let view = rank(Vec::new(), 1);
        assert!(view.top.is_empty());
        assert!(view.requester.is_none());
    }

    #[test]
    fn test_sorted_descending_with_one_based_ranks() {
        let entries = vec![
            (1, entry("alice", 3)),
            (2, entry("bob", 9)),
            (3, entry("carol", 6)),
        ];

        let view = rank(entries, 2);

        let order: Vec<(usize, PlayerId, u32)> = view
            .top
            .iter()
            .map(|ranked| (ranked.rank, ranked.player, ranked.score))
            .collect();
        assert_eq!(order, vec![(1, 2, 9), (2, 3, 6), (3, 1, 3)]);
        assert!(view.requester.is_none()); // already in the top
    }

    #[test]
    fn test_ties_keep_input_order() {
        let entries = vec![(1, entry("alice", 5)), (2, entry("bob", 5))];
        let view = rank(entries, 99);
        assert_eq!(view.top[0].player, 1);
        assert_eq!(view.top[1].player, 2);
    }

    #[test]
    fn test_truncates_to_ten() {
        let entries: Vec<(PlayerId, ScoreEntry)> = (0..15)
            .map(|i| (i, entry(&format!("player{i}"), 100 - i as u32)))
            .collect();

        let view = rank(entries, 0);
        assert_eq!(view.top.len(), LEADERBOARD_SIZE);
        assert_eq!(view.top[0].score, 100);
        assert_eq!(view.top[9].score, 91);
    }

    #[test]
    fn test_requester_outside_top_gets_full_set_rank() {
        let mut entries: Vec<(PlayerId, ScoreEntry)> = (0..12)
            .map(|i| (i, entry(&format!("player{i}"), 100 - i as u32)))
            .collect();
        entries.push((99, entry("late joiner", 1)));

        let view = rank(entries, 99);

        assert_eq!(view.top.len(), LEADERBOARD_SIZE);
        let requester = view.requester.expect("requester line");
        assert_eq!(requester.rank, 13);
        assert_eq!(requester.player, 99);
        assert_eq!(requester.score, 1);
    }

    #[test]
    fn test_unknown_requester_gets_no_line() {
        let entries: Vec<(PlayerId, ScoreEntry)> = (0..12)
            .map(|i| (i, entry(&format!("player{i}"), 100 - i as u32)))
            .collect();

        let view = rank(entries, 4242);
        assert!(view.requester.is_none());
    }
}
