pub mod repositories;
pub mod store;

pub use repositories::{RoundRepository, ScoreRepository};
pub use store::{DocumentStore, MemoryStore, RestStore, StoreError};
