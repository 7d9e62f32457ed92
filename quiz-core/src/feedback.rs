use std::collections::HashMap;

use quiz_types::{GuessFeedback, LetterFeedback, WORD_LENGTH};

/// Classify a guess against the secret, one symbol per position.
///
/// Two passes: exact matches first, each consuming one copy of its
/// letter, then in-word matches against whatever copies remain. A letter
/// repeated in the guess more often than in the secret is credited only
/// as many times as the secret can cover.
///
/// Pure and deterministic; both inputs must already be exactly five
/// lowercase ASCII letters.
pub fn feedback(guess: &str, secret: &str) -> GuessFeedback {
    let guess_chars: Vec<char> = guess.chars().collect();
    let secret_chars: Vec<char> = secret.chars().collect();
    debug_assert_eq!(guess_chars.len(), WORD_LENGTH);
    debug_assert_eq!(secret_chars.len(), WORD_LENGTH);

    let mut result = [LetterFeedback::Miss; WORD_LENGTH];

    // First pass: mark hits, count the unmatched secret letters
    let mut remaining: HashMap<char, u32> = HashMap::new();
    for i in 0..WORD_LENGTH {
        if guess_chars[i] == secret_chars[i] {
            result[i] = LetterFeedback::Hit;
        } else {
            *remaining.entry(secret_chars[i]).or_insert(0) += 1;
        }
    }

    // Second pass: mark present letters, bounded by the unmatched copies
    for i in 0..WORD_LENGTH {
        if result[i] == LetterFeedback::Hit {
            continue;
        }
        if let Some(count) = remaining.get_mut(&guess_chars[i]) {
            if *count > 0 {
                result[i] = LetterFeedback::Present;
                *count -= 1;
            }
        }
    }

    result
}
