use std::env;

use anyhow::{Context, Result};

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub store_url: String,
    pub words_file: String,
    pub chat_api_url: String,
    pub dictionary_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            store_url: env::var("STORE_URL").context("STORE_URL must be set")?,
            words_file: env::var("WORDS_FILE").unwrap_or_else(|_| "words.txt".to_string()),
            chat_api_url: env::var("CHAT_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            dictionary_api_url: env::var("DICTIONARY_API_URL")
                .unwrap_or_else(|_| "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()),
        })
    }
}
