use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;

/// Retries for an unavailable store call before giving up.
const MAX_RETRIES: u32 = 2;
/// Delay before the first retry; doubles per retry.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);
/// Hard cap on any single round trip to the store.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed document at {path}")]
    Malformed { path: String },
}

/// JSON document store keyed by slash-separated paths.
///
/// `get` keeps "confirmed absent" (`Ok(None)`) apart from "could not
/// determine" (`Err`), so callers decide per call whether to degrade.
/// Reading a path with children assembles them into one object, the way
/// the backing service serves a subtree.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;
    async fn put(&self, path: &str, document: &Value) -> Result<(), StoreError>;
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

/// REST client for the remote document store.
///
/// Transient failures are retried with doubling backoff; a 404 status or
/// a JSON `null` body reads as confirmed absent.
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
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

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_once(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Unavailable(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        let value: Value = response.json().await.map_err(|_| StoreError::Malformed {
            path: path.to_string(),
        })?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    async fn write_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), StoreError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // Deleting something already gone still counts as deleted
        if method == Method::DELETE && response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(StoreError::Unavailable(format!(
                "{} {} returned {}",
                method,
                path,
                response.status()
            )));
        }
        Ok(())
    }

    async fn write_with_retries(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), StoreError> {
        let mut delay = RETRY_BASE_DELAY;
        let mut attempt = 0;
        loop {
            match self.write_once(method.clone(), path, body).await {
                Ok(()) => return Ok(()),
                Err(StoreError::Unavailable(reason)) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "store {} {} unavailable (retry {}/{}): {}",
                        method,
                        path,
                        attempt,
                        MAX_RETRIES,
                        reason
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let mut delay = RETRY_BASE_DELAY;
        let mut attempt = 0;
        loop {
            match self.get_once(path).await {
                Ok(value) => return Ok(value),
                Err(StoreError::Unavailable(reason)) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "store GET {} unavailable (retry {}/{}): {}",
                        path,
                        attempt,
                        MAX_RETRIES,
                        reason
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn put(&self, path: &str, document: &Value) -> Result<(), StoreError> {
        self.write_with_retries(Method::PUT, path, Some(document))
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.write_with_retries(Method::DELETE, path, None).await
    }
}

/// In-memory store for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let documents = self.documents.read().await;
        if let Some(value) = documents.get(path) {
            return Ok(Some(value.clone()));
        }

        // Assemble immediate children into one object for prefix reads
        let prefix = format!("{path}/");
        let mut children = serde_json::Map::new();
        for (key, value) in documents.iter() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                if !rest.contains('/') {
                    children.insert(rest.to_string(), value.clone());
                }
            }
        }
        if children.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Value::Object(children)))
        }
    }

    async fn put(&self, path: &str, document: &Value) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(path.to_string(), document.clone());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.documents.write().await.remove(path);
        Ok(())
    }
}
