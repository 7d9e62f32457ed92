use quiz_types::{GuessFeedback, PlayerId, Round, WORD_LENGTH, earns_bonus};

use crate::feedback::feedback;
use crate::words::WordList;

/// Why a well-formed five-letter guess was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("'{0}' is not in the word list")]
    UnknownWord(String),
    #[error("'{0}' was already guessed this round")]
    AlreadyGuessed(String),
}

/// What an accepted guess did to the round.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// Wrong word; the round stays active.
    Incorrect { feedback: GuessFeedback, attempt: u32 },
    /// The secret was found; the round is over.
    Solved {
        feedback: GuessFeedback,
        attempt: u32,
        bonus: bool,
    },
}

/// Lowercase and shape-check free text as a guess candidate.
///
/// Anything that is not exactly five ASCII letters is ordinary chat
/// noise, not a guess, and comes back as `None`.
pub fn normalize_guess(text: &str) -> Option<String> {
    let word = text.trim().to_lowercase();
    if word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

/// Apply one normalized guess to a round.
///
/// An accepted guess is appended to the round history and bumps the
/// player's attempt count whether or not it solved the word; the caller
/// persists (or deletes) the round afterwards. Rejected guesses leave
/// the round untouched.
pub fn apply_guess(
    round: &mut Round,
    words: &WordList,
    player: PlayerId,
    word: &str,
) -> Result<GuessOutcome, GuessError> {
    if !words.contains(word) {
        return Err(GuessError::UnknownWord(word.to_string()));
    }
    if round.guessed_words.iter().any(|previous| previous == word) {
        return Err(GuessError::AlreadyGuessed(word.to_string()));
    }

    round.guessed_words.push(word.to_string());
    let counter = round.attempts.entry(player).or_insert(0);
    *counter += 1;
    let attempt = *counter;

    let feedback = feedback(word, &round.secret_word);
    if word == round.secret_word {
        Ok(GuessOutcome::Solved {
            feedback,
            attempt,
            bonus: earns_bonus(attempt),
        })
    } else {
        Ok(GuessOutcome::Incorrect { feedback, attempt })
    }
}
