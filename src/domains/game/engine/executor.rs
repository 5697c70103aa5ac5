// =====================================================
// Executor - 거래 실행
// =====================================================
// 역할: 검증을 통과한 거래를 현금/보유 주식에 반영
//
// 매수:
// - 현금 -= 체결 금액
// - 보유 있음 → 수량 += 요청 수량, 평균 단가 가중 평균으로 갱신
// - 보유 없음 → 새 행 (평균 단가 = 체결 가격)
//
// 매도:
// - 현금 += 체결 금액
// - 수량 -= 요청 수량, 0 이하가 되면 행 삭제
// - 평균 단가는 매도 시 바뀌지 않음
//
// 호출자(Coordinator)가 연 트랜잭션 안에서만 실행됩니다.
// 해당 플레이어 행과 해당 보유 행 외에는 건드리지 않습니다.
// =====================================================

use anyhow::{anyhow, bail, Result};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;
use crate::domains::game::models::{Holding, TradeType};
use crate::shared::database::{HoldingRepository, PlayerRepository};
use crate::shared::utils::{credit_units, debit_units, round_price};

/// 보유 주식 변경 계획
/// Planned change to one holding row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldingChange {
    /// 새 보유 행 생성 (첫 매수)
    Create { quantity: i32, average_price: Decimal },
    /// 추가 매수: 수량 + 평균 단가 갱신
    Update { holding_id: Uuid, quantity: i32, average_price: Decimal },
    /// 일부 매도: 수량만 감소
    Reduce { holding_id: Uuid, quantity: i32 },
    /// 전량 매도: 행 삭제
    Delete { holding_id: Uuid },
}

/// 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// 실행 후 현금
    pub cash_after: i64,
    pub holding_change: HoldingChange,
}

/// 가중 평균 단가
/// Weighted average cost, rounded to price scale
///
/// ((기존 수량 × 기존 평균) + (매수 수량 × 체결 가격)) / (기존 수량 + 매수 수량)
pub fn weighted_average_price(
    old_quantity: i32,
    old_average: Decimal,
    quantity: i32,
    price: Decimal,
) -> Decimal {
    let total_quantity = Decimal::from(old_quantity) + Decimal::from(quantity);
    if total_quantity.is_zero() {
        return price;
    }
    let total_cost = Decimal::from(old_quantity) * old_average + Decimal::from(quantity) * price;
    round_price(total_cost / total_quantity)
}

/// 매수 시 보유 변경 계획
pub fn plan_buy(existing: Option<&Holding>, quantity: i32, price: Decimal) -> Result<HoldingChange> {
    match existing {
        Some(holding) => {
            let new_quantity = holding
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| anyhow!("Holding quantity overflow for {}", holding.stock_code))?;
            Ok(HoldingChange::Update {
                holding_id: holding.id,
                quantity: new_quantity,
                average_price: weighted_average_price(
                    holding.quantity,
                    holding.average_price,
                    quantity,
                    price,
                ),
            })
        }
        None => Ok(HoldingChange::Create {
            quantity,
            average_price: round_price(price),
        }),
    }
}

/// 매도 시 보유 변경 계획
pub fn plan_sell(existing: &Holding, quantity: i32) -> HoldingChange {
    let remaining = existing.quantity - quantity;
    if remaining <= 0 {
        HoldingChange::Delete { holding_id: existing.id }
    } else {
        HoldingChange::Reduce { holding_id: existing.id, quantity: remaining }
    }
}

/// 체결 금액 → 현금 증감 (정수 원 단위)
/// Cash delta in whole units, negative for buys
///
/// 매수는 올림, 매도는 내림. 같은 가격에서 사고팔기를 반복해도 현금이 늘지 않습니다.
pub fn cash_delta(trade_type: TradeType, total_cost: Decimal) -> Result<i64> {
    let out_of_range = || anyhow!("Trade amount {} out of range", total_cost);
    Ok(match trade_type {
        TradeType::Buy => -debit_units(total_cost).ok_or_else(out_of_range)?,
        TradeType::Sell => credit_units(total_cost).ok_or_else(out_of_range)?,
    })
}

/// 거래 실행기
/// Applies an accepted trade inside a caller-supplied transaction
pub struct TradeExecutor;

impl TradeExecutor {
    /// 거래 실행
    /// Execute an accepted trade
    ///
    /// # Arguments
    /// * `conn` - 트랜잭션 연결 (플레이어 행 락이 이미 잡혀 있어야 함)
    /// * `existing` - 락 이후 트랜잭션 안에서 읽은 보유 스냅샷
    ///
    /// # Returns
    /// * `Ok(ExecutionOutcome)` - 실행 후 현금과 적용한 보유 변경
    /// * `Err` - DB 오류 (호출자가 롤백)
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        conn: &mut PgConnection,
        trade_type: TradeType,
        player_id: Uuid,
        stock_code: &str,
        quantity: i32,
        price: Decimal,
        total_cost: Decimal,
        existing: Option<&Holding>,
    ) -> Result<ExecutionOutcome> {
        let holding_change = match trade_type {
            TradeType::Buy => plan_buy(existing, quantity, price)?,
            TradeType::Sell => match existing {
                Some(holding) => plan_sell(holding, quantity),
                // 검증을 통과했다면 도달할 수 없음
                None => bail!("No holding of {} to sell for player {}", stock_code, player_id),
            },
        };

        let cash_after =
            PlayerRepository::adjust_cash(&mut *conn, player_id, cash_delta(trade_type, total_cost)?)
                .await?;

        match &holding_change {
            HoldingChange::Create { quantity, average_price } => {
                HoldingRepository::create(&mut *conn, player_id, stock_code, *quantity, *average_price)
                    .await?;
            }
            HoldingChange::Update { holding_id, quantity, average_price } => {
                HoldingRepository::update(&mut *conn, *holding_id, *quantity, *average_price).await?;
            }
            HoldingChange::Reduce { holding_id, quantity } => {
                HoldingRepository::update_quantity(&mut *conn, *holding_id, *quantity).await?;
            }
            HoldingChange::Delete { holding_id } => {
                HoldingRepository::delete(&mut *conn, *holding_id).await?;
            }
        }

        Ok(ExecutionOutcome { cash_after, holding_change })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn holding(quantity: i32, average_price: Decimal) -> Holding {
        Holding {
            id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            stock_code: "CHKN".to_string(),
            quantity,
            average_price,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_buy_creates_holding_at_price() {
        let change = plan_buy(None, 10, Decimal::from(50_000)).unwrap();
        assert_eq!(
            change,
            HoldingChange::Create { quantity: 10, average_price: Decimal::from(50_000) }
        );
        assert_eq!(cash_delta(TradeType::Buy, Decimal::from(500_000)).unwrap(), -500_000);
    }

    #[test]
    fn test_second_buy_weighted_average() {
        // 10주 @ 50,000 보유 후 5주 @ 60,000 매수 → 800,000 / 15 = 53,333.33
        let existing = holding(10, Decimal::from(50_000));
        let change = plan_buy(Some(&existing), 5, Decimal::from(60_000)).unwrap();
        assert_eq!(
            change,
            HoldingChange::Update {
                holding_id: existing.id,
                quantity: 15,
                average_price: Decimal::new(5_333_333, 2),
            }
        );
    }

    #[test]
    fn test_weighted_average_stays_between_prices() {
        let avg = weighted_average_price(3, Decimal::new(10_050, 2), 7, Decimal::new(9_925, 2));
        assert!(avg >= Decimal::new(9_925, 2));
        assert!(avg <= Decimal::new(10_050, 2));
        // (301.50 + 694.75) / 10 = 99.625 → 99.63
        assert_eq!(avg, Decimal::new(9_963, 2));
    }

    #[test]
    fn test_full_sell_deletes_holding() {
        let existing = holding(15, Decimal::new(5_333_333, 2));
        assert_eq!(plan_sell(&existing, 15), HoldingChange::Delete { holding_id: existing.id });
        assert_eq!(cash_delta(TradeType::Sell, Decimal::from(1_050_000)).unwrap(), 1_050_000);
    }

    #[test]
    fn test_partial_sell_keeps_average() {
        let existing = holding(15, Decimal::new(5_333_333, 2));
        assert_eq!(
            plan_sell(&existing, 4),
            HoldingChange::Reduce { holding_id: existing.id, quantity: 11 }
        );
    }

    #[test]
    fn test_cash_delta_rounds_against_player() {
        assert_eq!(cash_delta(TradeType::Buy, Decimal::new(10_001, 2)).unwrap(), -101);
        assert_eq!(cash_delta(TradeType::Sell, Decimal::new(10_099, 2)).unwrap(), 100);

        // 2주 매수 후 1주씩 두 번 매도: 40,001 차감, 20,000 × 2 입금
        let price = Decimal::new(2_000_050, 2);
        let bought = cash_delta(TradeType::Buy, price * Decimal::from(2)).unwrap();
        let sold = cash_delta(TradeType::Sell, price).unwrap() * 2;
        assert!(bought + sold <= 0);
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        let existing = holding(i32::MAX, Decimal::from(1));
        assert!(plan_buy(Some(&existing), 1, Decimal::from(1)).is_err());
    }
}
