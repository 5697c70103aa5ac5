use axum::{
    routing::{get, post},
    Router,
};
use crate::shared::services::AppState;

use super::handlers;

/// 게임 라우터 생성
/// Create game router
///
/// `/api/games/:game_id` 아래에 등록됩니다.
///
/// # Routes
///
/// ## Trades (거래)
/// - `POST   /trades` - 매수/매도 실행
/// - `POST   /trades/validate` - 거래 사전 검증
/// - `GET    /trades` - 게임 체결 내역
/// - `GET    /trades/recent` - 최근 체결 내역
/// - `GET    /trades/history?player_id=` - 플레이어 거래 내역
/// - `GET    /players/:player_id/stats` - 플레이어 거래 통계
///
/// ## Portfolio (포트폴리오)
/// - `GET    /portfolio?player_id=` - 포트폴리오 조회
/// - `GET    /leaderboard` - 순위표
///
/// ## Stocks (종목)
/// - `GET    /stocks` - 시세판
/// - `GET    /stocks/:stock_code/trades` - 종목별 체결 내역 + 거래량
pub fn create_game_router() -> Router<AppState> {
    Router::new()
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Trades (거래)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        // 매수/매도 실행 & 게임 체결 내역
        .route("/trades",
            post(handlers::submit_trade)
                .get(handlers::get_game_trades)
        )

        // 사전 검증 (상태 변경 없음)
        .route("/trades/validate", post(handlers::validate_trade))

        // 최근 체결 내역
        .route("/trades/recent", get(handlers::get_recent_trades))

        // 플레이어 거래 내역
        .route("/trades/history", get(handlers::get_trade_history))

        // 플레이어 거래 통계
        .route("/players/:player_id/stats", get(handlers::get_trading_stats))

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Portfolio (포트폴리오)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        .route("/portfolio", get(handlers::get_portfolio))
        .route("/leaderboard", get(handlers::get_leaderboard))

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Stocks (종목)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        .route("/stocks", get(handlers::get_stock_prices))
        .route("/stocks/:stock_code/trades", get(handlers::get_stock_trades))
}
