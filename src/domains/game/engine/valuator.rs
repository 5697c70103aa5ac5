// =====================================================
// Valuator - 포트폴리오 평가
// =====================================================
// 총 주식 평가액 = Σ 수량 × 현재가
// 총 자산        = 현금 + 총 주식 평가액   (정수 원 단위로 반올림)
// 손익           = 총 자산 - 시작 자본     (반올림된 총 자산 기준)
// 수익률(%)      = 손익 / 시작 자본 × 100 (소수점 2자리)
//
// 현재가가 없거나 0인 종목은 평균 단가로 평가합니다.
// 가격 데이터가 빠졌다는 뜻이므로 warn 로그를 남깁니다.
// =====================================================

use anyhow::Result;
use log::warn;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use std::collections::HashMap;
use uuid::Uuid;
use crate::domains::game::models::{Holding, HoldingValuation, Valuation};
use crate::shared::database::{GameRepository, HoldingRepository, PlayerRepository, StockGameRepository};
use crate::shared::utils::{percent_of, to_units};

/// 평가에 쓸 가격 (현재가, 없거나 0이면 평균 단가)
fn price_for(holding: &Holding, prices: &HashMap<String, Decimal>) -> Decimal {
    match prices.get(&holding.stock_code) {
        Some(price) if !price.is_zero() => *price,
        _ => {
            warn!(
                "No live price for {} (player {}), valuing at average price {}",
                holding.stock_code, holding.player_id, holding.average_price
            );
            holding.average_price
        }
    }
}

/// 포트폴리오 평가 (순수 계산)
/// Compute a valuation from cash, holdings and live prices
pub fn compute_valuation(
    cash: i64,
    holdings: &[Holding],
    prices: &HashMap<String, Decimal>,
    starting_capital: i64,
) -> Result<Valuation> {
    let stock_value: Decimal = holdings
        .iter()
        .map(|h| Decimal::from(h.quantity) * price_for(h, prices))
        .sum();

    let total = Decimal::from(cash) + stock_value;
    let total_asset_value = to_units(total)
        .ok_or_else(|| anyhow::anyhow!("Total asset value {} out of range", total))?;

    // 손익은 반올림된 총 자산 기준 (total_asset_value - profit_loss == 시작 자본)
    let profit_loss = total_asset_value
        .checked_sub(starting_capital)
        .ok_or_else(|| anyhow::anyhow!("Profit/loss out of range"))?;

    Ok(Valuation {
        total_asset_value,
        profit_loss,
        profit_rate: percent_of(Decimal::from(profit_loss), Decimal::from(starting_capital)),
    })
}

/// 보유 종목 하나의 미실현 손익
/// Unrealized P&L of one holding, never persisted
pub fn value_holding(
    holding: &Holding,
    stock_name: Option<String>,
    prices: &HashMap<String, Decimal>,
) -> HoldingValuation {
    let quantity = Decimal::from(holding.quantity);
    let current_price = price_for(holding, prices);
    let current_value = quantity * current_price;
    let cost_value = quantity * holding.average_price;
    let profit_loss = current_value - cost_value;

    HoldingValuation {
        stock_code: holding.stock_code.clone(),
        stock_name,
        quantity: holding.quantity,
        average_price: holding.average_price,
        current_price,
        current_value,
        profit_loss,
        profit_rate: percent_of(profit_loss, cost_value),
    }
}

/// 포트폴리오 평가기
/// Recomputes and persists a player's derived valuation fields
pub struct PortfolioValuator;

impl PortfolioValuator {
    /// 재평가 후 플레이어 행에 저장
    /// Revalue a player inside the current transaction
    ///
    /// # Returns
    /// * `Ok(Some(Valuation))` - 저장된 평가 값
    /// * `Ok(None)` - 플레이어/게임이 사라짐 (아무것도 하지 않음)
    pub async fn revalue(
        conn: &mut PgConnection,
        player_id: Uuid,
        game_id: Uuid,
    ) -> Result<Option<Valuation>> {
        let Some(player) = PlayerRepository::find_by_id(&mut *conn, game_id, player_id).await? else {
            return Ok(None);
        };
        let Some(starting_capital) = GameRepository::get_start_capital(&mut *conn, game_id).await? else {
            return Ok(None);
        };

        let holdings = HoldingRepository::find_by_player(&mut *conn, player_id).await?;
        let prices = StockGameRepository::get_current_prices(&mut *conn, game_id).await?;
        let valuation = compute_valuation(player.current_cash, &holdings, &prices, starting_capital)?;

        if PlayerRepository::update_valuation(&mut *conn, player_id, &valuation).await? {
            Ok(Some(valuation))
        } else {
            Ok(None)
        }
    }
}
