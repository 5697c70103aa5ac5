use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

/// 거래 거절 사유
/// Trade rejection reasons
///
/// 형식이 올바른 요청이 비즈니스 규칙에 의해 거절된 경우입니다.
/// 모두 변경 전에 감지되며, 트랜잭션은 아무것도 남기지 않고 롤백됩니다.
/// 사용자에게 그대로 보여줄 수 있는 메시지를 가집니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeRejection {
    /// 거래 수량이 0 이하
    /// Quantity must be positive
    #[error("Trade quantity must be greater than 0")]
    InvalidQuantity,

    /// 잔고 부족 (매수)
    /// Insufficient cash for a buy
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Decimal, available: i64 },

    /// 보유 주식 부족 (매도)
    /// Insufficient shares for a sell
    #[error("Insufficient stock: required {required} shares, available {available} shares")]
    InsufficientStock { required: i32, available: i32 },

    /// 플레이어를 찾을 수 없음
    /// Player not found in this game
    #[error("Player not found")]
    PlayerNotFound,

    /// 게임에 해당 종목이 없음
    /// Instrument not found in this game
    #[error("Stock not found in this game")]
    InstrumentNotFound,
}

impl TradeRejection {
    /// API 응답용 사유 코드
    /// Reason code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TradeRejection::InvalidQuantity => "INVALID_QUANTITY",
            TradeRejection::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TradeRejection::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            TradeRejection::PlayerNotFound => "PLAYER_NOT_FOUND",
            TradeRejection::InstrumentNotFound => "INSTRUMENT_NOT_FOUND",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TradeRejection::PlayerNotFound | TradeRejection::InstrumentNotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// 거래 처리 에러
/// Trade processing errors
///
/// - `Rejected`: 비즈니스 거절 (사용자에게 표시)
/// - `Timeout` / `Infrastructure`: 락 타임아웃, 연결 끊김, 직렬화 충돌 등
///   → 전체 롤백, "다시 시도" 신호만 반환 (내부 재시도 없음)
#[derive(Error, Debug)]
pub enum TradeError {
    #[error(transparent)]
    Rejected(#[from] TradeRejection),

    /// 거래 처리 시간 초과 (트랜잭션은 롤백됨)
    #[error("Trade timed out after {0} ms")]
    Timeout(u64),

    #[error("Infrastructure failure: {0:#}")]
    Infrastructure(#[from] anyhow::Error),
}

impl TradeError {
    pub fn code(&self) -> &'static str {
        match self {
            TradeError::Rejected(rejection) => rejection.code(),
            TradeError::Timeout(_) | TradeError::Infrastructure(_) => "TRY_AGAIN",
        }
    }

    pub fn rejection(&self) -> Option<&TradeRejection> {
        match self {
            TradeError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for TradeError {
    fn from(err: sqlx::Error) -> Self {
        TradeError::Infrastructure(err.into())
    }
}

/// TradeError를 HTTP 응답으로 변환
impl From<TradeError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: TradeError) -> Self {
        let code = err.code();
        match &err {
            TradeError::Rejected(rejection) => (
                rejection.status(),
                Json(json!({ "error": rejection.to_string(), "code": code })),
            ),
            // 인프라 오류 상세는 로그로만 남기고 클라이언트에는 일반 메시지
            TradeError::Timeout(_) | TradeError::Infrastructure(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "Trade could not be processed, please try again",
                    "code": code,
                })),
            ),
        }
    }
}
