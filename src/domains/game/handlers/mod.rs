// Game handlers module
// 게임 핸들러 모듈

pub mod trade_handler;
pub mod portfolio_handler;

pub use trade_handler::*;
pub use portfolio_handler::*;
