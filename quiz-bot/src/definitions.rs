use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

/// Fallback shown when no definition can be produced for a solved word.
pub const NO_DEFINITION: &str = "No meaning found.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Best-effort dictionary lookup; failures never surface to the round flow.
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    async fn define(&self, word: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
}

fn first_definition(entries: Vec<DictionaryEntry>) -> Option<String> {
    entries
        .into_iter()
        .next()?
        .meanings
        .into_iter()
        .next()?
        .definitions
        .into_iter()
        .next()
        .map(|d| d.definition)
        .filter(|definition| !definition.trim().is_empty())
}

/// Client for a dictionaryapi.dev-style endpoint: GET `{base}/{word}` answers
/// with a list of entries carrying nested meanings.
pub struct DictionaryClient {
    client: Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, word: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            // Words absent from the dictionary come back as 404.
            return Ok(None);
        }
        let entries: Vec<DictionaryEntry> = response.json().await?;
        Ok(first_definition(entries))
    }
}

#[async_trait]
impl DefinitionLookup for DictionaryClient {
    async fn define(&self, word: &str) -> String {
        match self.fetch(word).await {
            Ok(Some(definition)) => definition,
            Ok(None) => NO_DEFINITION.to_string(),
            Err(e) => {
                warn!("Definition lookup for '{}' failed: {}", word, e);
                NO_DEFINITION.to_string()
            }
        }
    }
}
