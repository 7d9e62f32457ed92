use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};

use quiz_types::RoomId;

/// In-process coordination state for one room.
///
/// The store holds the round itself; this only tracks whether a round is
/// believed live, which start owns the current timers, and the lock that
/// serializes read-modify-write cycles against the store.
pub struct RoomSession {
    live: AtomicBool,
    generation: AtomicU64,
    guard: Mutex<()>,
}

impl RoomSession {
    fn new() -> Self {
        Self {
            live: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            guard: Mutex::new(()),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::SeqCst);
    }

    /// Bumps the generation, invalidating every timer spawned for earlier
    /// starts. Call with the room lock held.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().await
    }
}

/// Lazily populated map of per-room sessions.
pub struct SessionMap {
    rooms: DashMap<RoomId, Arc<RoomSession>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Returns the session for a room, creating it on first use.
    pub fn session(&self, room: RoomId) -> Arc<RoomSession> {
        self.rooms
            .entry(room)
            .or_insert_with(|| Arc::new(RoomSession::new()))
            .value()
            .clone()
    }

    /// Read-only lookup that never allocates, so chatter in rooms that never
    /// started a round does not grow the map.
    pub fn peek(&self, room: RoomId) -> Option<Arc<RoomSession>> {
        self.rooms.get(&room).map(|entry| entry.value().clone())
    }
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}
