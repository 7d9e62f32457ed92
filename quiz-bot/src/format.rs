//! All user-visible message texts live here so handlers stay free of
//! string-building noise.

use quiz_core::{GuessError, LeaderboardView};
use quiz_types::{GuessFeedback, LetterFeedback};

/// Emoji row for one guess, one square per letter.
pub fn squares(feedback: &GuessFeedback) -> String {
    feedback
        .iter()
        .map(|letter| match letter {
            LetterFeedback::Hit => '🟩',
            LetterFeedback::Present => '🟨',
            LetterFeedback::Miss => '⬛',
        })
        .collect()
}

pub fn greeting() -> &'static str {
    "👋 Hello! I pick a five-letter word and you guess it.\nType /quiz to start a round, /help for all commands."
}

pub fn help_text() -> &'static str {
    "📖 Commands:\n\
     /quiz - start a new round\n\
     /hint - reveal one letter (after 5 guesses)\n\
     /end - end the round early (admins only)\n\
     /global - leaderboard across all chats\n\
     /local - leaderboard for this chat\n\
     /ping - check that I am alive\n\
     /help - this message\n\n\
     Guess by sending any five-letter word."
}

pub fn pong() -> &'static str {
    "pong 🏓"
}

pub fn round_started() -> &'static str {
    "🎯 A new round has started! Guess the five-letter word."
}

pub fn start_failed() -> &'static str {
    "😵 Could not start a round, try again in a moment."
}

pub fn guess_feedback(
    word: &str,
    feedback: &GuessFeedback,
    display_name: &str,
    attempt: u32,
) -> String {
    format!(
        "{}\n{} guessed {} (attempt {})",
        squares(feedback),
        display_name,
        word.to_uppercase(),
        attempt
    )
}

pub fn rejected_guess(error: &GuessError) -> String {
    match error {
        GuessError::UnknownWord(_) => format!("🤔 {error}"),
        GuessError::AlreadyGuessed(_) => format!("♻️ {error}"),
    }
}

pub fn win_announcement(
    feedback: &GuessFeedback,
    display_name: &str,
    word: &str,
    definition: &str,
    attempt: u32,
    points: u32,
) -> String {
    format!(
        "{}\n🎉 {} got it in {}! The word was {}.\n📖 {}\n+{} {}",
        squares(feedback),
        display_name,
        attempts_text(attempt),
        word.to_uppercase(),
        definition,
        points,
        point_noun(points)
    )
}

pub fn no_active_round() -> &'static str {
    "There is no round running. Start one with /quiz."
}

pub fn round_stopped(word: Option<&str>) -> String {
    match word {
        Some(word) => format!("🛑 Round ended. The word was {}.", word.to_uppercase()),
        None => "🛑 Round ended.".to_string(),
    }
}

pub fn admin_only() -> &'static str {
    "🚫 Only group admins can end a round."
}

pub fn cannot_verify_admin() -> &'static str {
    "⚠️ Could not verify your permissions, try again in a moment."
}

pub fn hint_locked(made: usize, needed: usize) -> String {
    format!(
        "🔒 Hints unlock after {} guesses; this round has {} so far.",
        needed, made
    )
}

pub fn hint(letter: char) -> String {
    format!("💡 The word contains the letter '{}'.", letter)
}

pub fn expiry_warning() -> &'static str {
    "⏳ Five minutes left! The word has not been found yet."
}

pub fn round_expired(word: &str) -> String {
    format!("⌛ Time is up! The word was {}.", word.to_uppercase())
}

pub fn store_trouble() -> &'static str {
    "😵 The game store is unreachable right now, try again in a moment."
}

pub fn leaderboard_unavailable() -> &'static str {
    "😵 The leaderboard is unavailable right now, try again later."
}

pub fn global_title() -> &'static str {
    "🏆 Global leaderboard"
}

pub fn local_title() -> &'static str {
    "🏆 This chat's leaderboard"
}

/// Renders the top entries, then the requester's own rank below a separator
/// when they did not make the list.
pub fn leaderboard(title: &str, view: &LeaderboardView) -> String {
    if view.top.is_empty() {
        return format!("{}\nNo points yet. Win a round to get on the board!", title);
    }

    let mut lines = vec![title.to_string()];
    for entry in &view.top {
        lines.push(format!(
            "{}. {} — {}",
            entry.rank, entry.display_name, entry.score
        ));
    }
    if let Some(requester) = &view.requester {
        lines.push("…".to_string());
        lines.push(format!(
            "{}. {} — {}",
            requester.rank, requester.display_name, requester.score
        ));
    }
    lines.join("\n")
}

fn attempts_text(attempt: u32) -> String {
    if attempt == 1 {
        "1 attempt".to_string()
    } else {
        format!("{} attempts", attempt)
    }
}

fn point_noun(points: u32) -> &'static str {
    if points == 1 { "point" } else { "points" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::RankedEntry;
    use quiz_types::LetterFeedback::{Hit, Miss, Present};

    #[test]
    fn test_squares_maps_each_state() {
        let feedback = [Hit, Present, Miss, Miss, Hit];
        assert_eq!(squares(&feedback), "🟩🟨⬛⬛🟩");
    }

    #[test]
    fn test_guess_feedback_shows_attempt_and_word() {
        let feedback = [Miss; 5];
        let text = guess_feedback("crane", &feedback, "alice", 3);
        assert!(text.contains("CRANE"));
        assert!(text.contains("attempt 3"));
        assert!(text.starts_with("⬛⬛⬛⬛⬛"));
    }

    #[test]
    fn test_rejected_guess_wording() {
        let unknown = rejected_guess(&GuessError::UnknownWord("zzzzz".to_string()));
        assert!(unknown.contains("not in the word list"));

        let repeated = rejected_guess(&GuessError::AlreadyGuessed("crane".to_string()));
        assert!(repeated.contains("already guessed"));
    }

    #[test]
    fn test_win_announcement_pluralizes() {
        let feedback = [Hit; 5];
        let quick = win_announcement(&feedback, "alice", "crane", "A bird.", 1, 2);
        assert!(quick.contains("1 attempt!"));
        assert!(quick.contains("+2 points"));

        let slow = win_announcement(&feedback, "bob", "crane", "A bird.", 4, 1);
        assert!(slow.contains("4 attempts!"));
        assert!(slow.contains("+1 point"));
    }

    #[test]
    fn test_leaderboard_lists_top_then_requester() {
        let view = LeaderboardView {
            top: vec![
                RankedEntry {
                    rank: 1,
                    player: 10,
                    display_name: "alice".to_string(),
                    score: 12,
                },
                RankedEntry {
                    rank: 2,
                    player: 11,
                    display_name: "bob".to_string(),
                    score: 7,
                },
            ],
            requester: Some(RankedEntry {
                rank: 14,
                player: 99,
                display_name: "carol".to_string(),
                score: 1,
            }),
        };

        let text = leaderboard(global_title(), &view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "🏆 Global leaderboard");
        assert_eq!(lines[1], "1. alice — 12");
        assert_eq!(lines[2], "2. bob — 7");
        assert_eq!(lines[3], "…");
        assert_eq!(lines[4], "14. carol — 1");
    }

    #[test]
    fn test_empty_leaderboard_invites_play() {
        let view = LeaderboardView::default();
        let text = leaderboard(local_title(), &view);
        assert!(text.contains("No points yet"));
    }

    #[test]
    fn test_round_stopped_with_and_without_word() {
        assert_eq!(round_stopped(Some("crane")), "🛑 Round ended. The word was CRANE.");
        assert_eq!(round_stopped(None), "🛑 Round ended.");
    }
}
