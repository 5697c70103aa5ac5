// =====================================================
// Coordinator - 거래 조정자
// =====================================================
// 역할: 거래 상태를 바꾸는 유일한 진입점
//
// 처리 흐름 (하나의 트랜잭션):
// RECEIVED → LOCKED → VALIDATED → EXECUTED → LEDGERED → REVALUED → COMMITTED
//
// 1. 트랜잭션 시작 (SET LOCAL lock_timeout)
// 2. 플레이어 행 SELECT ... FOR UPDATE (게임 범위)
// 3. 종목 현재가 조회 (없으면 InstrumentNotFound)
// 4. 락 이후 트랜잭션 안에서 보유 조회 → 검증
// 5. 실행 → 원장 추가 → 재평가
// 6. 커밋
//
// 커밋 전 어디서든 실패하면 트랜잭션이 drop 되면서 전부 롤백됩니다.
// 전체 처리는 trade_timeout 으로 제한되며, 내부 재시도는 하지 않습니다.
// =====================================================

use log::{debug, info, warn};
use uuid::Uuid;
use crate::domains::game::engine::executor::{ExecutionOutcome, TradeExecutor};
use crate::domains::game::engine::validator::validate;
use crate::domains::game::engine::valuator::PortfolioValuator;
use crate::domains::game::models::{Trade, TradeCreate, TradeType};
use crate::shared::config::AppConfig;
use crate::shared::database::{
    Database, HoldingRepository, PlayerRepository, StockGameRepository, TradeRepository,
};
use crate::shared::errors::{TradeError, TradeRejection};

/// 거래 조정자
/// Trade coordinator, sequences one trade inside one transaction
#[derive(Clone)]
pub struct TradeCoordinator {
    db: Database,
    config: AppConfig,
}

impl TradeCoordinator {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self { db, config }
    }

    /// 거래 제출
    /// Submit a buy/sell order
    ///
    /// # Returns
    /// * `Ok(Trade)` - 커밋된 체결 내역
    /// * `Err(TradeError::Rejected)` - 비즈니스 거절 (상태 변경 없음)
    /// * `Err(TradeError::Timeout | Infrastructure)` - 롤백됨, 다시 시도 필요
    pub async fn submit(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        stock_code: &str,
        trade_type: TradeType,
        quantity: i32,
    ) -> Result<Trade, TradeError> {
        let unit_of_work = self.run(game_id, player_id, stock_code, trade_type, quantity);

        let result = match tokio::time::timeout(self.config.trade_timeout(), unit_of_work).await {
            Ok(result) => result,
            Err(_) => Err(TradeError::Timeout(self.config.trade_timeout_ms)),
        };

        match &result {
            Ok((trade, outcome)) => info!(
                "Trade committed: game={} player={} {} {} x{} @ {} (total {}, cash after {}, holding {:?})",
                game_id, player_id, trade.trade_type, trade.stock_code, trade.quantity,
                trade.price, trade.total_amount, outcome.cash_after, outcome.holding_change
            ),
            Err(TradeError::Rejected(rejection)) => debug!(
                "Trade rejected: game={} player={} {} {} x{}: {}",
                game_id, player_id, trade_type, stock_code, quantity, rejection
            ),
            Err(err) => warn!(
                "Trade failed: game={} player={} {} {} x{}: {}",
                game_id, player_id, trade_type, stock_code, quantity, err
            ),
        }

        result.map(|(trade, _)| trade)
    }

    async fn run(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        stock_code: &str,
        trade_type: TradeType,
        quantity: i32,
    ) -> Result<(Trade, ExecutionOutcome), TradeError> {
        let mut tx = self.db.begin_trade(self.config.lock_timeout()).await?;

        // LOCKED: 같은 플레이어의 다른 거래는 여기서 대기
        let player = PlayerRepository::find_for_update(&mut *tx, game_id, player_id)
            .await?
            .ok_or(TradeRejection::PlayerNotFound)?;

        let stock = StockGameRepository::find_by_game_and_stock(&mut *tx, game_id, stock_code)
            .await?
            .ok_or(TradeRejection::InstrumentNotFound)?;

        let holding =
            HoldingRepository::find_by_player_and_stock(&mut *tx, player_id, stock_code).await?;

        // VALIDATED
        let validated = validate(
            trade_type,
            Some(&player),
            Some(stock.current_price),
            quantity,
            holding.as_ref(),
        )?;

        // EXECUTED
        let outcome = TradeExecutor::execute(
            &mut tx,
            trade_type,
            player_id,
            stock_code,
            quantity,
            stock.current_price,
            validated.total_cost,
            holding.as_ref(),
        )
        .await?;

        // LEDGERED
        let trade = TradeRepository::create(
            &mut *tx,
            &TradeCreate {
                game_id,
                player_id,
                stock_code: stock.stock_code.clone(),
                trade_type,
                quantity,
                price: stock.current_price,
                total_amount: validated.total_cost,
            },
        )
        .await?;

        // REVALUED
        PortfolioValuator::revalue(&mut tx, player_id, game_id).await?;

        // COMMITTED
        tx.commit().await?;

        Ok((trade, outcome))
    }
}
