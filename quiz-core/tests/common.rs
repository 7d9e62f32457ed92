use quiz_core::WordList;
use quiz_types::{PlayerId, Round, ScoreEntry};

/// Creates a test WordList with a known set of words
pub fn create_test_words() -> WordList {
    let word_list =
        "apple\ncrane\ncrate\nslate\nstale\nhouse\nmouse\ntrain\nplane\nwater\nstone\nbread\ncream\nhello\nworld";
    WordList::parse(word_list)
}

/// Creates a round with a fixed secret and generation 1
pub fn create_round_with_secret(secret: &str) -> Round {
    Round::new(secret.to_string(), 1)
}

/// Creates a score entry with the given name and score
pub fn create_score_entry(name: &str, score: u32) -> ScoreEntry {
    ScoreEntry {
        display_name: name.to_string(),
        score,
    }
}

/// Creates a descending score table of `count` players, ids 1..=count
pub fn create_score_table(count: usize) -> Vec<(PlayerId, ScoreEntry)> {
    (1..=count)
        .map(|i| {
            (
                i as PlayerId,
                create_score_entry(&format!("Player{i}"), (100 - i) as u32),
            )
        })
        .collect()
}
