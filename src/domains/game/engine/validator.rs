// =====================================================
// Validator - 거래 검증
// =====================================================
// 역할: 플레이어/가격/보유 스냅샷만 보고 거래 가능 여부 판단
//
// 검증 순서:
// 1. 플레이어 존재
// 2. 종목(가격) 존재
// 3. 수량 > 0
// 4. 매수: 현금 >= 가격 × 수량
//    매도: 보유 수량 >= 요청 수량
//
// I/O가 없으므로 같은 입력이면 항상 같은 결과입니다.
// 거래 실행 경로(락 잡은 스냅샷)와 사전 검증 API(락 없는 스냅샷)가
// 이 함수 하나를 같이 씁니다.
// =====================================================

use rust_decimal::Decimal;
use crate::domains::game::models::{Holding, Player, TradeType};
use crate::shared::errors::TradeRejection;

/// 검증 통과 결과
/// Accepted trade with its computed cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedTrade {
    /// 체결 금액 = 가격 × 수량
    pub total_cost: Decimal,
}

/// 거래 검증
/// Validate a trade against player, price and holding snapshots
///
/// # Arguments
/// * `trade_type` - 매수/매도
/// * `player` - 플레이어 스냅샷 (없으면 PlayerNotFound)
/// * `price` - 종목 현재가 (없으면 InstrumentNotFound)
/// * `quantity` - 요청 수량
/// * `holding` - 해당 종목 보유 스냅샷 (없으면 보유 0)
///
/// # Returns
/// * `Ok(ValidatedTrade)` - 체결 금액 포함
/// * `Err(TradeRejection)` - 거절 사유
pub fn validate(
    trade_type: TradeType,
    player: Option<&Player>,
    price: Option<Decimal>,
    quantity: i32,
    holding: Option<&Holding>,
) -> Result<ValidatedTrade, TradeRejection> {
    let player = player.ok_or(TradeRejection::PlayerNotFound)?;
    let price = price.ok_or(TradeRejection::InstrumentNotFound)?;

    if quantity <= 0 {
        return Err(TradeRejection::InvalidQuantity);
    }

    let total_cost = price * Decimal::from(quantity);

    match trade_type {
        TradeType::Buy => {
            if Decimal::from(player.current_cash) < total_cost {
                return Err(TradeRejection::InsufficientFunds {
                    required: total_cost,
                    available: player.current_cash,
                });
            }
        }
        TradeType::Sell => {
            let available = holding.map(|h| h.quantity).unwrap_or(0);
            if available < quantity {
                return Err(TradeRejection::InsufficientStock {
                    required: quantity,
                    available,
                });
            }
        }
    }

    Ok(ValidatedTrade { total_cost })
}
