// All repositories module
pub mod game;

// Re-export all repositories for convenience
pub use game::*;
