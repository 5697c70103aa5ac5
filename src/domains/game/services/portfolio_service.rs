use crate::domains::game::engine::valuator::{compute_valuation, value_holding};
use crate::domains::game::models::{
    Holding, HoldingValuation, LeaderboardEntry, PortfolioSnapshot, StockPriceChange,
};
use crate::shared::database::{
    Database, GameRepository, HoldingRepository, PlayerRepository, StockGameRepository,
};
use anyhow::{Context, Result};
use uuid::Uuid;

/// 포트폴리오 서비스
/// Portfolio Service
///
/// 역할:
/// - 포트폴리오 스냅샷 (보유 종목별 미실현 손익 포함)
/// - 순위표
/// - 시세판
///
/// 모두 읽기 전용입니다. 락을 잡지 않고 아무것도 저장하지 않습니다.
/// 저장되는 평가 값은 거래 커밋 시 Coordinator만 갱신합니다.
#[derive(Clone)]
pub struct PortfolioService {
    db: Database,
}

impl PortfolioService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 포트폴리오 스냅샷 조회
    /// Revalue and fetch a player's portfolio without persisting
    ///
    /// # Returns
    /// * `Ok(Some(PortfolioSnapshot))` - 현재가 기준 평가
    /// * `Ok(None)` - 플레이어 또는 게임이 없음
    /// * `Err` - 데이터베이스 오류 시
    pub async fn get_portfolio(
        &self,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<Option<PortfolioSnapshot>> {
        let pool = self.db.pool();

        let Some(player) = PlayerRepository::find_by_id(pool, game_id, player_id)
            .await
            .context("Failed to fetch player")?
        else {
            return Ok(None);
        };
        let Some(starting_capital) = GameRepository::get_start_capital(pool, game_id)
            .await
            .context("Failed to fetch game")?
        else {
            return Ok(None);
        };

        let named_holdings = HoldingRepository::find_by_player_with_names(pool, player_id)
            .await
            .context("Failed to fetch holdings")?;
        let prices = StockGameRepository::get_current_prices(pool, game_id)
            .await
            .context("Failed to fetch current prices")?;

        let holdings: Vec<Holding> = named_holdings.iter().map(|(h, _)| h.clone()).collect();
        let valuation = compute_valuation(player.current_cash, &holdings, &prices, starting_capital)?;

        let holding_values: Vec<HoldingValuation> = named_holdings
            .into_iter()
            .map(|(holding, name)| value_holding(&holding, name, &prices))
            .collect();

        Ok(Some(PortfolioSnapshot {
            player_id,
            cash: player.current_cash,
            total_asset_value: valuation.total_asset_value,
            profit_loss: valuation.profit_loss,
            profit_rate: valuation.profit_rate,
            holdings: holding_values,
        }))
    }

    /// 순위표 (총 자산 내림차순)
    /// Leaderboard ordered by stored total asset value
    pub async fn get_leaderboard(&self, game_id: Uuid) -> Result<Vec<LeaderboardEntry>> {
        PlayerRepository::get_leaderboard(self.db.pool(), game_id)
            .await
            .context(format!("Failed to fetch leaderboard for game {}", game_id))
    }

    /// 시세판
    /// Current prices with change percent
    pub async fn get_price_board(&self, game_id: Uuid) -> Result<Vec<StockPriceChange>> {
        StockGameRepository::get_price_changes(self.db.pool(), game_id)
            .await
            .context(format!("Failed to fetch prices for game {}", game_id))
    }
}
