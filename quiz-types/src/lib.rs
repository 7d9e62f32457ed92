pub mod round;
pub mod score;

// Re-export all types
pub use round::*;
pub use score::*;
