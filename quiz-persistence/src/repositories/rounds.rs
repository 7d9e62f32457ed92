use std::sync::Arc;

use quiz_types::{RoomId, Round};

use crate::store::{DocumentStore, StoreError};

/// Persists the one-per-room `Round` documents under `games/{room}`.
pub struct RoundRepository {
    store: Arc<dyn DocumentStore>,
}

impl RoundRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(room: RoomId) -> String {
        format!("games/{room}")
    }

    /// Fetch a room's round. `Ok(None)` means the room verifiably has no
    /// round; an undecodable document is an error, not an empty round.
    pub async fn fetch(&self, room: RoomId) -> Result<Option<Round>, StoreError> {
        let path = Self::path(room);
        match self.store.get(&path).await? {
            Some(value) => {
                let round = serde_json::from_value(value)
                    .map_err(|_| StoreError::Malformed { path })?;
                Ok(Some(round))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, room: RoomId, round: &Round) -> Result<(), StoreError> {
        let document = serde_json::to_value(round).map_err(|_| StoreError::Malformed {
            path: Self::path(room),
        })?;
        self.store.put(&Self::path(room), &document).await
    }

    pub async fn clear(&self, room: RoomId) -> Result<(), StoreError> {
        self.store.delete(&Self::path(room)).await
    }
}
