use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Chat-platform room identifier (negative for group rooms).
pub type RoomId = i64;

/// Chat-platform player identifier.
pub type PlayerId = i64;

/// Every secret word and accepted guess has exactly this many letters.
pub const WORD_LENGTH: usize = 5;

/// One in-progress guessing game, scoped to a single chat room.
///
/// The authoritative copy lives in the document store under `games/{room}`;
/// a room has at most one live round at a time, and the absence of the
/// record means no guessing is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub secret_word: String,
    pub guessed_words: Vec<String>,
    pub attempts: HashMap<PlayerId, u32>,
    pub started_at: String, // RFC 3339 string
    pub generation: u64,
}

impl Round {
    pub fn new(secret_word: String, generation: u64) -> Self {
        Round {
            secret_word,
            guessed_words: Vec::new(),
            attempts: HashMap::new(),
            started_at: Utc::now().to_rfc3339(),
            generation,
        }
    }

    /// Guesses accepted so far across all players in this round.
    pub fn total_guesses(&self) -> usize {
        self.guessed_words.len()
    }

    pub fn attempts_for(&self, player: PlayerId) -> u32 {
        self.attempts.get(&player).copied().unwrap_or(0)
    }
}

/// Per-position classification of one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterFeedback {
    Hit,     // right letter, right position
    Present, // letter occurs elsewhere in the secret
    Miss,    // letter not in the secret (or all copies spoken for)
}

/// Feedback for a full guess, one symbol per letter position.
pub type GuessFeedback = [LetterFeedback; WORD_LENGTH];
