use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =====================================================
// Player 모델
// =====================================================
// 역할: (유저, 게임) 한 쌍당 하나의 플레이어
//
// 불변식:
// - current_cash >= 0 (DB CHECK 제약 + 검증기)
// - 현금은 거래 실행기와 외부 입장/퇴장 흐름만 변경
// - total_asset_value / profit_loss / profit_rate 는 평가기가 매 거래 후 재계산
// =====================================================

/// 게임 참가자 정보
/// Game participant
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = Player)]
pub struct Player {
    pub id: Uuid,
    pub game_id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "치킨왕")]
    pub nickname: String,

    /// 보유 현금 (정수 원 단위)
    /// Cash balance (whole currency units)
    #[schema(example = 1000000)]
    pub current_cash: i64,

    /// 총 자산 (현금 + 주식 평가액)
    #[schema(example = 1000000)]
    pub total_asset_value: i64,

    /// 손익 (총 자산 - 시작 자본)
    #[schema(example = 0)]
    pub profit_loss: i64,

    /// 수익률 (%)
    #[schema(value_type = String, example = "0.00")]
    pub profit_rate: Decimal,

    pub ranking: Option<i32>,
    pub is_ready: bool,
    pub is_connected: bool,
    pub joined_at: DateTime<Utc>,
}
