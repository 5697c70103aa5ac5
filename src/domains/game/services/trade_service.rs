use crate::domains::game::engine::{validate, TradeCoordinator};
use crate::domains::game::models::{
    StockTrades, Trade, TradeRequest, TradeValidationResponse, TradingStats,
};
use crate::shared::config::AppConfig;
use crate::shared::database::{
    Database, HoldingRepository, PlayerRepository, StockGameRepository, TradeRepository,
};
use crate::shared::errors::TradeError;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 최근 체결 조회 기본 개수
const RECENT_TRADE_LIMIT: i64 = 10;

/// 거래 서비스
/// Trade Service
///
/// 역할:
/// - 거래 제출 (Coordinator에 위임)
/// - 거래 사전 검증 (상태 변경 없음)
/// - 체결 내역 / 통계 조회
///
/// 조회는 락을 잡지 않으므로 진행 중인 거래와 비교해 약간 늦을 수 있습니다.
#[derive(Clone)]
pub struct TradeService {
    db: Database,
    config: AppConfig,
    coordinator: TradeCoordinator,
}

impl TradeService {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let coordinator = TradeCoordinator::new(db.clone(), config.clone());
        Self { db, config, coordinator }
    }

    /// 거래 제출
    /// Submit a trade
    pub async fn submit_trade(&self, game_id: Uuid, request: TradeRequest) -> Result<Trade, TradeError> {
        self.coordinator
            .submit(
                game_id,
                request.player_id,
                &request.stock_code,
                request.trade_type,
                request.quantity,
            )
            .await
    }

    /// 거래 사전 검증 (dry-run)
    /// Validate a trade without executing it
    ///
    /// 실제 거래와 같은 검증기를 락 없는 스냅샷에 적용합니다.
    /// 통과해도 실제 제출 시점에는 결과가 달라질 수 있습니다.
    ///
    /// # Returns
    /// * `Ok(TradeValidationResponse)` - is_valid / 거절 사유 / 예상 금액
    /// * `Err` - 데이터베이스 오류 시
    pub async fn validate_trade(
        &self,
        game_id: Uuid,
        request: &TradeRequest,
    ) -> Result<TradeValidationResponse> {
        let pool = self.db.pool();

        let player = PlayerRepository::find_by_id(pool, game_id, request.player_id)
            .await
            .context("Failed to load player for validation")?;
        let stock = StockGameRepository::find_by_game_and_stock(pool, game_id, &request.stock_code)
            .await
            .context("Failed to load stock for validation")?;
        let holding = match &player {
            Some(player) => {
                HoldingRepository::find_by_player_and_stock(pool, player.id, &request.stock_code)
                    .await
                    .context("Failed to load holding for validation")?
            }
            None => None,
        };

        let price = stock.as_ref().map(|s| s.current_price);
        let estimated_cost = price
            .filter(|_| request.quantity > 0)
            .map(|p| p * Decimal::from(request.quantity));

        let response = match validate(
            request.trade_type,
            player.as_ref(),
            price,
            request.quantity,
            holding.as_ref(),
        ) {
            Ok(validated) => TradeValidationResponse {
                is_valid: true,
                error: None,
                code: None,
                estimated_cost: Some(validated.total_cost),
            },
            Err(rejection) => TradeValidationResponse {
                is_valid: false,
                error: Some(rejection.to_string()),
                code: Some(rejection.code().to_string()),
                estimated_cost,
            },
        };

        Ok(response)
    }

    /// 플레이어 거래 내역 (최신순)
    /// Trade history of one player
    pub async fn get_player_trades(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Trade>> {
        let limit = self.config.clamp_limit(limit);
        let offset = offset.unwrap_or(0).max(0);

        TradeRepository::find_by_game_and_player(self.db.pool(), game_id, player_id, limit, offset)
            .await
            .context(format!("Failed to fetch trades for player {}", player_id))
    }

    /// 게임 전체 체결 내역
    /// Trades of a game
    pub async fn get_game_trades(&self, game_id: Uuid, limit: Option<i64>) -> Result<Vec<Trade>> {
        TradeRepository::find_by_game(self.db.pool(), game_id, self.config.clamp_limit(limit))
            .await
            .context(format!("Failed to fetch trades for game {}", game_id))
    }

    /// 최근 체결 내역 (기본 10개)
    /// Recent trades of a game
    pub async fn get_recent_trades(&self, game_id: Uuid, limit: Option<i64>) -> Result<Vec<Trade>> {
        self.get_game_trades(game_id, Some(limit.unwrap_or(RECENT_TRADE_LIMIT)))
            .await
    }

    /// 종목별 체결 내역 + 총 거래량
    /// Trades and total traded quantity of one stock
    pub async fn get_stock_trades(
        &self,
        game_id: Uuid,
        stock_code: &str,
        limit: Option<i64>,
    ) -> Result<StockTrades> {
        let pool = self.db.pool();

        let trades =
            TradeRepository::find_by_stock(pool, game_id, stock_code, self.config.clamp_limit(limit))
                .await
                .context(format!("Failed to fetch trades for stock {}", stock_code))?;
        let total_volume = TradeRepository::get_total_trade_volume(pool, game_id, stock_code)
            .await
            .context(format!("Failed to fetch volume for stock {}", stock_code))?;

        Ok(StockTrades {
            stock_code: stock_code.to_string(),
            total_volume,
            trades,
        })
    }

    /// 플레이어 거래 통계
    /// Trading statistics of one player
    pub async fn get_trading_stats(&self, game_id: Uuid, player_id: Uuid) -> Result<TradingStats> {
        TradeRepository::get_player_stats(self.db.pool(), game_id, player_id)
            .await
            .context(format!("Failed to fetch trading stats for player {}", player_id))
    }
}
