// Game services module
// 게임 서비스 모듈

pub mod trade_service;
pub mod portfolio_service;
pub mod state;

pub use trade_service::*;
pub use portfolio_service::*;
pub use state::*;
