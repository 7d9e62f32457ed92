mod common;

use common::*;
use quiz_core::{GuessError, GuessOutcome, LEADERBOARD_SIZE, apply_guess, leaderboard};
use quiz_types::{LetterFeedback, points_for};

#[test]
fn test_word_list_vocabulary() {
    let words = create_test_words();
    assert!(words.contains("crane"));
    assert!(words.contains("hello"));
    assert!(!words.contains("zzzzz"));
    assert_eq!(words.len(), 15);
}

#[test]
fn test_full_round_to_solve() {
    let words = create_test_words();
    let mut round = create_round_with_secret("crane");
    let (alice, bob) = (1001, 1002);

    // two misses from two players
    match apply_guess(&mut round, &words, alice, "slate").unwrap() {
        GuessOutcome::Incorrect { attempt, feedback } => {
            assert_eq!(attempt, 1);
            assert!(feedback.contains(&LetterFeedback::Hit)); // the final 'e'
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    match apply_guess(&mut round, &words, bob, "crate").unwrap() {
        GuessOutcome::Incorrect { attempt, .. } => assert_eq!(attempt, 1),
        other => panic!("unexpected outcome: {other:?}"),
    }

    // the same word again is refused, from either player
    assert_eq!(
        apply_guess(&mut round, &words, alice, "crate"),
        Err(GuessError::AlreadyGuessed("crate".to_string()))
    );

    // bob solves on his second attempt
    match apply_guess(&mut round, &words, bob, "crane").unwrap() {
        GuessOutcome::Solved {
            feedback,
            attempt,
            bonus,
        } => {
            assert_eq!(feedback, [LetterFeedback::Hit; 5]);
            assert_eq!(attempt, 2);
            assert!(bonus);
            assert_eq!(points_for(bonus), 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(round.guessed_words, vec!["slate", "crate", "crane"]);
    assert_eq!(round.total_guesses(), 3);
    assert_eq!(round.attempts_for(alice), 1);
    assert_eq!(round.attempts_for(bob), 2);
}

#[test]
fn test_slow_solve_scores_single_point() {
    let words = create_test_words();
    let mut round = create_round_with_secret("world");
    let player = 7;

    for word in ["crane", "slate", "house", "mouse"] {
        apply_guess(&mut round, &words, player, word).unwrap();
    }
    match apply_guess(&mut round, &words, player, "world").unwrap() {
        GuessOutcome::Solved { attempt, bonus, .. } => {
            assert_eq!(attempt, 5);
            assert!(!bonus);
            assert_eq!(points_for(bonus), 1);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_leaderboard_over_full_table() {
    let table = create_score_table(14);

    // requester ranked 12th of 14
    let view = leaderboard::rank(table.clone(), 12);
    assert_eq!(view.top.len(), LEADERBOARD_SIZE);
    assert_eq!(view.top[0].display_name, "Player1");
    assert_eq!(view.top[0].rank, 1);
    let requester = view.requester.expect("requester line");
    assert_eq!(requester.rank, 12);
    assert_eq!(requester.score, 88);

    // requester inside the top gets no extra line
    let view = leaderboard::rank(table, 3);
    assert!(view.requester.is_none());
}
