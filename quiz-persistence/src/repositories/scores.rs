use std::sync::Arc;

use serde_json::Value;

use quiz_types::{PlayerId, RoomId, ScoreEntry, ScoreScope, points_for};

use crate::store::{DocumentStore, StoreError};

/// The cumulative score ledgers, one document per (scope, player) under
/// `scores/global/{player}` and `scores/local/{room}/{player}`.
pub struct ScoreRepository {
    store: Arc<dyn DocumentStore>,
}

impl ScoreRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn entry_path(scope: ScoreScope, player: PlayerId) -> String {
        match scope {
            ScoreScope::Global => format!("scores/global/{player}"),
            ScoreScope::Local(room) => format!("scores/local/{room}/{player}"),
        }
    }

    fn bulk_path(scope: ScoreScope) -> String {
        match scope {
            ScoreScope::Global => "scores/global".to_string(),
            ScoreScope::Local(room) => format!("scores/local/{room}"),
        }
    }

    /// Add points to one scope's entry for a player, creating it on first
    /// award. The stored display name is overwritten every time.
    pub async fn add_points(
        &self,
        scope: ScoreScope,
        player: PlayerId,
        display_name: &str,
        points: u32,
    ) -> Result<u32, StoreError> {
        let path = Self::entry_path(scope, player);
        let mut entry = match self.store.get(&path).await? {
            Some(value) => serde_json::from_value::<ScoreEntry>(value)
                .map_err(|_| StoreError::Malformed { path: path.clone() })?,
            None => ScoreEntry::new(display_name.to_string()),
        };

        entry.score += points;
        entry.display_name = display_name.to_string();

        let document = serde_json::to_value(&entry)
            .map_err(|_| StoreError::Malformed { path: path.clone() })?;
        self.store.put(&path, &document).await?;
        Ok(entry.score)
    }

    /// Record a win: always the global ledger, and the room's local
    /// ledger as well when the win happened in a room. The two updates
    /// are sequential; a local failure after a landed global write is
    /// reported, not rolled back.
    pub async fn award(
        &self,
        player: PlayerId,
        display_name: &str,
        room: Option<RoomId>,
        bonus: bool,
    ) -> Result<u32, StoreError> {
        let points = points_for(bonus);

        self.add_points(ScoreScope::Global, player, display_name, points)
            .await?;
        if let Some(room) = room {
            if let Err(e) = self
                .add_points(ScoreScope::Local(room), player, display_name, points)
                .await
            {
                tracing::error!(
                    "global score for player {} recorded, but local score for room {} failed: {}",
                    player,
                    room,
                    e
                );
                return Err(e);
            }
        }
        Ok(points)
    }

    /// Read a whole scope's ledger. An absent scope is an empty ledger;
    /// entries that fail to decode are skipped. The order is the store's
    /// document key order, which is stable within a call.
    pub async fn entries(
        &self,
        scope: ScoreScope,
    ) -> Result<Vec<(PlayerId, ScoreEntry)>, StoreError> {
        let path = Self::bulk_path(scope);
        let Some(value) = self.store.get(&path).await? else {
            return Ok(Vec::new());
        };
        let Value::Object(map) = value else {
            return Err(StoreError::Malformed { path });
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let Ok(player) = key.parse::<PlayerId>() else {
                tracing::warn!("skipping score entry with non-numeric key '{}' in {}", key, path);
                continue;
            };
            match serde_json::from_value::<ScoreEntry>(value) {
                Ok(entry) => entries.push((player, entry)),
                Err(_) => {
                    tracing::warn!("skipping undecodable score entry for {} in {}", player, path);
                }
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn setup() -> ScoreRepository {
        ScoreRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_award_without_room_touches_global_only() {
        let repo = setup();

        let points = repo.award(1001, "alice", None, false).await.unwrap();
        assert_eq!(points, 1);

        let global = repo.entries(ScoreScope::Global).await.unwrap();
        assert_eq!(global, vec![(1001, ScoreEntry { display_name: "alice".to_string(), score: 1 })]);
        assert!(repo.entries(ScoreScope::Local(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_award_with_room_touches_both_scopes() {
        let repo = setup();

        let points = repo.award(1001, "alice", Some(-42), true).await.unwrap();
        assert_eq!(points, 2);

        let global = repo.entries(ScoreScope::Global).await.unwrap();
        let local = repo.entries(ScoreScope::Local(-42)).await.unwrap();
        assert_eq!(global[0].1.score, 2);
        assert_eq!(local[0].1.score, 2);
    }

    #[tokio::test]
    async fn test_awards_accumulate() {
        let repo = setup();

        repo.award(7, "bob", Some(1), true).await.unwrap(); // +2
        repo.award(7, "bob", Some(1), false).await.unwrap(); // +1
        repo.award(7, "bob", Some(2), true).await.unwrap(); // +2, other room

        let global = repo.entries(ScoreScope::Global).await.unwrap();
        assert_eq!(global[0].1.score, 5);

        let room_one = repo.entries(ScoreScope::Local(1)).await.unwrap();
        assert_eq!(room_one[0].1.score, 3);

        let room_two = repo.entries(ScoreScope::Local(2)).await.unwrap();
        assert_eq!(room_two[0].1.score, 2);
    }

    #[tokio::test]
    async fn test_display_name_is_overwritten() {
        let repo = setup();

        repo.award(7, "old name", None, false).await.unwrap();
        repo.award(7, "new name", None, false).await.unwrap();

        let global = repo.entries(ScoreScope::Global).await.unwrap();
        assert_eq!(global[0].1.display_name, "new name");
        assert_eq!(global[0].1.score, 2);
    }

    #[tokio::test]
    async fn test_empty_scope_reads_as_empty_ledger() {
        let repo = setup();
        assert!(repo.entries(ScoreScope::Global).await.unwrap().is_empty());
        assert!(repo.entries(ScoreScope::Local(9)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_entries_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        store
            .put("scores/global/1001", &json!({"display_name": "alice", "score": 3}))
            .await
            .unwrap();
        store
            .put("scores/global/1002", &json!("not an entry"))
            .await
            .unwrap();
        let repo = ScoreRepository::new(store);

        let entries = repo.entries(ScoreScope::Global).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, 1001);
    }
}
