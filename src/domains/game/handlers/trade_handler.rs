use crate::domains::game::models::{
    StockTrades, Trade, TradeRequest, TradeValidationResponse, TradingStats,
};
use crate::shared::services::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// =====================================================
// Trade Handler
// =====================================================
// 역할: 매수/매도 및 체결 내역 HTTP API 엔드포인트
//
// 처리 흐름:
// HTTP Request → Handler → TradeService → Coordinator/Repository → Response
//
// 인증/세션은 이 서버의 범위 밖입니다.
// 호출자(게임 서버 게이트웨이)가 player_id를 확인해서 넘겨준다고 가정합니다.
// =====================================================

fn internal_error(context: &str, e: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    log::error!("{}: {:#}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": format!("{}: {}", context, e)
        })),
    )
}

/// 거래 실행 핸들러
/// Submit trade handler
///
/// 현재가로 즉시 체결합니다 (시장가).
///
/// # Response
/// - 201: 체결 성공
/// - 400: 거절 (수량 오류, 잔고 부족, 보유 주식 부족)
/// - 404: 플레이어 또는 종목 없음
/// - 503: 일시적 오류 (다시 시도)
#[utoipa::path(
    post,
    path = "/api/games/{game_id}/trades",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    request_body = TradeRequest,
    responses(
        (status = 201, description = "Trade executed", body = Trade),
        (status = 400, description = "Trade rejected (INVALID_QUANTITY, INSUFFICIENT_FUNDS, INSUFFICIENT_STOCK)"),
        (status = 404, description = "Player or stock not found in this game"),
        (status = 503, description = "Transient failure, try again (TRY_AGAIN)")
    ),
    tag = "Trades"
)]
pub async fn submit_trade(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<TradeRequest>,
) -> Result<(StatusCode, Json<Trade>), (StatusCode, Json<serde_json::Value>)> {
    let trade = app_state
        .game_state
        .trade_service
        .submit_trade(game_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(trade)))
}

/// 거래 사전 검증 핸들러
/// Validate trade handler
///
/// 상태를 바꾸지 않고 거래 가능 여부만 확인합니다.
/// 거절이어도 200으로 응답하고 is_valid = false 를 반환합니다.
#[utoipa::path(
    post,
    path = "/api/games/{game_id}/trades/validate",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    request_body = TradeRequest,
    responses(
        (status = 200, description = "Validation result", body = TradeValidationResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn validate_trade(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeValidationResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .game_state
        .trade_service
        .validate_trade(game_id, &request)
        .await
        .map_err(|e| internal_error("Failed to validate trade", e))?;

    Ok(Json(response))
}

/// 체결 내역 개수 쿼리 파라미터
/// Query parameters with a limit
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TradeLimitQuery {
    /// 최대 조회 개수 (기본: 50, 최근 체결은 10, 최대: 1000)
    /// Limit (default: 50, recent trades: 10, max: 1000)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// 게임 체결 내역 조회 핸들러
/// Get game trades handler
///
/// Newest first. Returns at most 50 trades when `limit` is omitted; larger limits are capped at 1000.
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/trades",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        TradeLimitQuery
    ),
    responses(
        (status = 200, description = "Trades retrieved successfully", body = Vec<Trade>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_game_trades(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Query(query): Query<TradeLimitQuery>,
) -> Result<Json<Vec<Trade>>, (StatusCode, Json<serde_json::Value>)> {
    let trades = app_state
        .game_state
        .trade_service
        .get_game_trades(game_id, query.limit)
        .await
        .map_err(|e| internal_error("Failed to get trades", e))?;

    Ok(Json(trades))
}

/// 최근 체결 내역 조회 핸들러 (기본 10개)
/// Get recent trades handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/trades/recent",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        TradeLimitQuery
    ),
    responses(
        (status = 200, description = "Recent trades retrieved successfully", body = Vec<Trade>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_recent_trades(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Query(query): Query<TradeLimitQuery>,
) -> Result<Json<Vec<Trade>>, (StatusCode, Json<serde_json::Value>)> {
    let trades = app_state
        .game_state
        .trade_service
        .get_recent_trades(game_id, query.limit)
        .await
        .map_err(|e| internal_error("Failed to get recent trades", e))?;

    Ok(Json(trades))
}

/// 플레이어 거래 내역 쿼리 파라미터
/// Query parameters for a player's trade history
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TradeHistoryQuery {
    /// 플레이어 ID
    pub player_id: Uuid,

    /// 최대 조회 개수 (기본: 50, 최대: 1000)
    #[serde(default)]
    pub limit: Option<i64>,

    /// 페이지네이션 오프셋 (기본: 0)
    #[serde(default)]
    pub offset: Option<i64>,
}

/// 플레이어 거래 내역 조회 핸들러
/// Get player trade history handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/trades/history",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        TradeHistoryQuery
    ),
    responses(
        (status = 200, description = "Trade history retrieved successfully", body = Vec<Trade>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_trade_history(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Query(query): Query<TradeHistoryQuery>,
) -> Result<Json<Vec<Trade>>, (StatusCode, Json<serde_json::Value>)> {
    let trades = app_state
        .game_state
        .trade_service
        .get_player_trades(game_id, query.player_id, query.limit, query.offset)
        .await
        .map_err(|e| internal_error("Failed to get trade history", e))?;

    Ok(Json(trades))
}

/// 종목별 체결 내역 조회 핸들러
/// Get trades of one stock handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/stocks/{stock_code}/trades",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        ("stock_code" = String, Path, description = "Stock code"),
        TradeLimitQuery
    ),
    responses(
        (status = 200, description = "Stock trades retrieved successfully", body = StockTrades),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_stock_trades(
    State(app_state): State<AppState>,
    Path((game_id, stock_code)): Path<(Uuid, String)>,
    Query(query): Query<TradeLimitQuery>,
) -> Result<Json<StockTrades>, (StatusCode, Json<serde_json::Value>)> {
    let stock_trades = app_state
        .game_state
        .trade_service
        .get_stock_trades(game_id, &stock_code, query.limit)
        .await
        .map_err(|e| internal_error("Failed to get stock trades", e))?;

    Ok(Json(stock_trades))
}

/// 플레이어 거래 통계 조회 핸들러
/// Get player trading stats handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/players/{player_id}/stats",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        ("player_id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Trading stats retrieved successfully", body = TradingStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_trading_stats(
    State(app_state): State<AppState>,
    Path((game_id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TradingStats>, (StatusCode, Json<serde_json::Value>)> {
    let stats = app_state
        .game_state
        .trade_service
        .get_trading_stats(game_id, player_id)
        .await
        .map_err(|e| internal_error("Failed to get trading stats", e))?;

    Ok(Json(stats))
}
