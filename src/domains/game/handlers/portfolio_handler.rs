use crate::domains::game::models::{LeaderboardEntry, PortfolioSnapshot, StockPriceChange};
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
// Portfolio Handler
// =====================================================
// 역할: 포트폴리오 / 순위표 / 시세판 조회
//
// 특징:
// - 읽기 전용, 락 없음
// - 포트폴리오는 요청 시점 현재가로 다시 계산해서 반환 (저장하지 않음)
// =====================================================

/// 포트폴리오 조회 쿼리 파라미터
/// Query parameters for portfolio
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PortfolioQuery {
    /// 플레이어 ID
    pub player_id: Uuid,
}

/// 포트폴리오 조회 핸들러
/// Get portfolio handler
///
/// # Response
/// - 200: 현금, 총 자산, 손익, 수익률 + 보유 종목별 미실현 손익
/// - 404: 플레이어 없음
/// - 500: 서버 오류
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/portfolio",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        PortfolioQuery
    ),
    responses(
        (status = 200, description = "Portfolio retrieved successfully", body = PortfolioSnapshot),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Portfolio"
)]
pub async fn get_portfolio(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<PortfolioSnapshot>, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = app_state
        .game_state
        .portfolio_service
        .get_portfolio(game_id, query.player_id)
        .await
        .map_err(|e| {
            log::error!("Failed to get portfolio: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Failed to get portfolio: {}", e)
                })),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "Player not found",
                    "code": "PLAYER_NOT_FOUND"
                })),
            )
        })?;

    Ok(Json(snapshot))
}

/// 순위표 조회 핸들러
/// Get leaderboard handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/leaderboard",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Leaderboard retrieved successfully", body = Vec<LeaderboardEntry>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Portfolio"
)]
pub async fn get_leaderboard(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<Vec<LeaderboardEntry>>, (StatusCode, Json<serde_json::Value>)> {
    let leaderboard = app_state
        .game_state
        .portfolio_service
        .get_leaderboard(game_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Failed to get leaderboard: {}", e)
                })),
            )
        })?;

    Ok(Json(leaderboard))
}

/// 시세판 조회 핸들러
/// Get stock prices handler
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/stocks",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Stock prices retrieved successfully", body = Vec<StockPriceChange>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Portfolio"
)]
pub async fn get_stock_prices(
    State(app_state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<Vec<StockPriceChange>>, (StatusCode, Json<serde_json::Value>)> {
    let prices = app_state
        .game_state
        .portfolio_service
        .get_price_board(game_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Failed to get stock prices: {}", e)
                })),
            )
        })?;

    Ok(Json(prices))
}
