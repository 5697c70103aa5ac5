// Domain modules
pub mod game;
