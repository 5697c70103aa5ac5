use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 보유 주식 (플레이어 × 종목당 최대 1행)
/// Holding, at most one row per (player, stock)
///
/// 행이 없으면 보유 수량 0을 의미합니다.
/// 행이 존재하는 동안 quantity > 0 이며, 0이 되는 매도는 행을 삭제합니다.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = Holding)]
pub struct Holding {
    pub id: Uuid,
    pub player_id: Uuid,

    #[schema(example = "CHKN")]
    pub stock_code: String,

    #[schema(example = 10)]
    pub quantity: i32,

    /// 가중 평균 매수 단가 (소수점 2자리)
    /// Weighted average cost per share
    #[schema(value_type = String, example = "50000.00")]
    pub average_price: Decimal,

    pub updated_at: DateTime<Utc>,
}
