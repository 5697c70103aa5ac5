use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =====================================================
// StockGame 모델 (게임별 종목 가격 상태)
// =====================================================
// 가격 시뮬레이터가 소유/갱신하는 행입니다.
// 거래 엔진은 current_price 를 읽기만 하고 절대 쓰지 않습니다.
// =====================================================

/// 게임 내 종목 가격 상태
/// Instrument price state within one game
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = StockGame)]
pub struct StockGame {
    pub id: Uuid,
    pub game_id: Uuid,

    #[schema(example = "CHKN")]
    pub stock_code: String,

    #[schema(value_type = String, example = "50000.00")]
    pub initial_price: Decimal,

    #[schema(value_type = String, example = "52000.00")]
    pub current_price: Decimal,

    #[schema(value_type = String, example = "0.05")]
    pub volatility: Decimal,
}

/// 종목 시세 (시작가 대비 변동률 포함)
/// Price board entry
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = StockPriceChange)]
pub struct StockPriceChange {
    #[schema(example = "CHKN")]
    pub stock_code: String,

    /// 종목명 (템플릿이 없으면 None)
    pub name: Option<String>,

    #[schema(value_type = String, example = "52000.00")]
    pub current_price: Decimal,

    #[schema(value_type = String, example = "50000.00")]
    pub initial_price: Decimal,

    /// (현재가 - 시작가) / 시작가 × 100
    #[schema(value_type = String, example = "4.00")]
    pub change_percent: Decimal,
}
