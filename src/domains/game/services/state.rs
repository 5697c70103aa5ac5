// Game domain state
// 게임 도메인 상태
use crate::domains::game::services::{PortfolioService, TradeService};
use crate::shared::config::AppConfig;
use crate::shared::database::Database;

/// Game domain state
/// 게임 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct GameState {
    pub trade_service: TradeService,
    pub portfolio_service: PortfolioService,
}

impl GameState {
    /// Create GameState with database and configuration
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self {
            trade_service: TradeService::new(db.clone(), config),
            portfolio_service: PortfolioService::new(db),
        }
    }
}
