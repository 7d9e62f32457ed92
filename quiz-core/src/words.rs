use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use rand::seq::IndexedRandom;

use quiz_types::WORD_LENGTH;

/// The vocabulary a round draws its secret from and validates guesses
/// against. Built once at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct WordList {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Build a word list from raw text, one candidate per line.
    ///
    /// Lines are trimmed and lowercased; blanks, `#` comments, and
    /// anything that is not exactly five ASCII letters are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut words: Vec<String> = raw
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|line| line.trim().to_lowercase())
            .filter(|word| {
                word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
            })
            .collect();
        words.sort();
        words.dedup();
        let index = words.iter().cloned().collect();

        Self { words, index }
    }

    /// Load and filter a word list file. Startup-time only: an unreadable
    /// file or an empty result is an error, not a degraded list.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {path}"))?;
        let list = Self::parse(&raw);
        if list.is_empty() {
            return Err(anyhow!("word list {path} contains no 5-letter words"));
        }
        Ok(list)
    }

    /// Check whether a word is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Pick a secret word uniformly at random.
    pub fn pick(&self) -> Result<&str> {
        self.words
            .choose(&mut rand::rng())
            .map(|word| word.as_str())
            .ok_or_else(|| anyhow!("no words available"))
    }
}

/// One uniformly random letter of the secret, with no position attached.
pub fn hint_letter(secret: &str) -> Option<char> {
    let letters: Vec<char> = secret.chars().collect();
    letters.choose(&mut rand::rng()).copied()
}
