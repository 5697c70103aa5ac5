use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

// =====================================================
// Trade 모델
// =====================================================
// 역할: 체결된 주문 한 건 = 거래 원장 한 줄
//
// 특징:
// - append-only: 생성 후 수정/삭제 없음
// - executed_at 순서가 거래 내역의 순서
// - 게임이 끝나도 남는 영구 기록 (통계/히스토리 조회의 원천)
// =====================================================

/// 거래 방향
/// Trade direction
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeType::Buy),
            "SELL" => Ok(TradeType::Sell),
            other => Err(anyhow::anyhow!("Unknown trade type: {}", other)),
        }
    }
}

/// 체결 내역 (DB에서 조회한 거래 원장 한 줄)
/// Trade record
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = Trade)]
pub struct Trade {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,

    #[schema(example = "CHKN")]
    pub stock_code: String,

    pub trade_type: TradeType,

    #[schema(example = 10)]
    pub quantity: i32,

    /// 체결 가격 (주당)
    /// Execution price per share
    #[schema(value_type = String, example = "50000.00")]
    pub price: Decimal,

    /// 체결 금액 (price × quantity)
    #[schema(value_type = String, example = "500000.00")]
    pub total_amount: Decimal,

    pub executed_at: DateTime<Utc>,
}

// =====================================================
// 체결 내역 생성용 (Repository에서 사용)
// =====================================================
/// 체결 내역 생성 시 사용하는 내부 모델
#[derive(Debug)]
pub struct TradeCreate {
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub stock_code: String,
    pub trade_type: TradeType,
    pub quantity: i32,
    pub price: Decimal,
    pub total_amount: Decimal,
}

// =====================================================
// 요청/응답 모델
// =====================================================

/// 거래 요청 (매수/매도)
/// Trade request
#[derive(Debug, Deserialize, ToSchema, Clone)]
#[schema(as = TradeRequest)]
pub struct TradeRequest {
    pub player_id: Uuid,

    #[schema(example = "CHKN")]
    pub stock_code: String,

    pub trade_type: TradeType,

    /// 거래 수량 (1 이상)
    #[schema(example = 10)]
    pub quantity: i32,
}

/// 거래 사전 검증 결과 (상태 변경 없음)
/// Dry-run validation result, never mutates state
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
#[schema(as = TradeValidationResponse)]
pub struct TradeValidationResponse {
    pub is_valid: bool,

    /// 거절 사유 메시지
    pub error: Option<String>,

    /// 거절 사유 코드 (예: "INSUFFICIENT_FUNDS")
    pub code: Option<String>,

    /// 예상 체결 금액 (현재가 × 수량), 가격을 알 수 없으면 None
    #[schema(value_type = Option<String>, example = "500000.00")]
    pub estimated_cost: Option<Decimal>,
}

/// 플레이어 거래 통계
/// Player trading statistics
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = TradingStats)]
pub struct TradingStats {
    pub total_trades: i64,
    pub buy_trades: i64,
    pub sell_trades: i64,

    #[schema(value_type = String, example = "800000.00")]
    pub total_buy_volume: Decimal,

    #[schema(value_type = String, example = "1050000.00")]
    pub total_sell_volume: Decimal,

    /// 매도 금액 - 매수 금액
    #[schema(value_type = String, example = "250000.00")]
    pub net_volume: Decimal,
}

/// 종목별 체결 내역 + 총 거래량
/// Trades of one stock with its total traded quantity
#[derive(Debug, Serialize, ToSchema, Clone)]
#[schema(as = StockTrades)]
pub struct StockTrades {
    #[schema(example = "CHKN")]
    pub stock_code: String,

    /// 총 거래 수량 (매수 + 매도)
    #[schema(example = 120)]
    pub total_volume: i64,

    pub trades: Vec<Trade>,
}
