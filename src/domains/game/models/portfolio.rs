use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =====================================================
// Portfolio 모델
// =====================================================
// Valuation        : 플레이어 행에 저장되는 파생 값 3개
// PortfolioSnapshot: 화면 표시용 (보유 종목별 미실현 손익 포함, 저장하지 않음)
//
// 예시 (시작 자본 1,000,000):
// - 현금 500,000 + CHKN 10주 × 55,000 = 1,050,000
//   → profit_loss: 50,000
//   → profit_rate: 5.00
// =====================================================

/// 포트폴리오 평가 결과
/// Portfolio valuation persisted on the player row
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = Valuation)]
pub struct Valuation {
    #[schema(example = 1050000)]
    pub total_asset_value: i64,

    #[schema(example = 50000)]
    pub profit_loss: i64,

    #[schema(value_type = String, example = "5.00")]
    pub profit_rate: Decimal,
}

/// 보유 종목 평가
/// Per-holding valuation, computed on demand
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = HoldingValuation)]
pub struct HoldingValuation {
    #[schema(example = "CHKN")]
    pub stock_code: String,

    pub stock_name: Option<String>,

    pub quantity: i32,

    #[schema(value_type = String, example = "50000.00")]
    pub average_price: Decimal,

    /// 현재가 (시세가 없으면 평균 단가)
    #[schema(value_type = String, example = "55000.00")]
    pub current_price: Decimal,

    /// 평가액 = 수량 × 현재가
    #[schema(value_type = String, example = "550000.00")]
    pub current_value: Decimal,

    /// 미실현 손익 = 평가액 - 수량 × 평균 단가
    #[schema(value_type = String, example = "50000.00")]
    pub profit_loss: Decimal,

    #[schema(value_type = String, example = "10.00")]
    pub profit_rate: Decimal,
}

/// 포트폴리오 스냅샷
/// Portfolio snapshot returned to callers
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = PortfolioSnapshot)]
pub struct PortfolioSnapshot {
    pub player_id: Uuid,
    pub cash: i64,
    pub total_asset_value: i64,
    pub profit_loss: i64,

    #[schema(value_type = String, example = "5.00")]
    pub profit_rate: Decimal,

    pub holdings: Vec<HoldingValuation>,
}

/// 순위표 항목
/// Leaderboard entry, rank derived at read time
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = LeaderboardEntry)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub player_id: Uuid,
    pub nickname: String,
    pub total_asset_value: i64,
    pub profit_loss: i64,

    #[schema(value_type = String, example = "5.00")]
    pub profit_rate: Decimal,
}
