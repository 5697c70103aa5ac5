// Game trading models
pub mod player;
pub mod holding;
pub mod stock_game;
pub mod trade;
pub mod portfolio;

pub use player::*;
pub use holding::*;
pub use stock_game::*;
pub use trade::*;
pub use portfolio::*;
