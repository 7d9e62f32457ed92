pub mod feedback;
pub mod judge;
pub mod leaderboard;
pub mod words;

// Re-export main components
pub use feedback::*;
pub use judge::*;
pub use leaderboard::*;
pub use words::*;
