pub mod rounds;
pub mod scores;

pub use rounds::RoundRepository;
pub use scores::ScoreRepository;
