use axum::Router;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stock_game_server::routes::create_router;
use stock_game_server::shared::config::AppConfig;
use stock_game_server::shared::database::Database;
use stock_game_server::shared::services::AppState;

// Import models for OpenAPI schema
use stock_game_server::domains::game::models::*;
use stock_game_server::domains::game::handlers::{
    PortfolioQuery, TradeHistoryQuery, TradeLimitQuery,
};

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        stock_game_server::domains::game::handlers::trade_handler::submit_trade,
        stock_game_server::domains::game::handlers::trade_handler::validate_trade,
        stock_game_server::domains::game::handlers::trade_handler::get_game_trades,
        stock_game_server::domains::game::handlers::trade_handler::get_recent_trades,
        stock_game_server::domains::game::handlers::trade_handler::get_trade_history,
        stock_game_server::domains::game::handlers::trade_handler::get_stock_trades,
        stock_game_server::domains::game::handlers::trade_handler::get_trading_stats,
        stock_game_server::domains::game::handlers::portfolio_handler::get_portfolio,
        stock_game_server::domains::game::handlers::portfolio_handler::get_leaderboard,
        stock_game_server::domains::game::handlers::portfolio_handler::get_stock_prices
    ),
    components(schemas(
        Player,
        Holding,
        StockGame,
        StockPriceChange,
        TradeType,
        Trade,
        TradeRequest,
        TradeValidationResponse,
        TradingStats,
        StockTrades,
        Valuation,
        HoldingValuation,
        PortfolioSnapshot,
        LeaderboardEntry,
        TradeLimitQuery,
        TradeHistoryQuery,
        PortfolioQuery
    )),
    tags(
        (name = "Trades", description = "Buy/sell execution and trade history"),
        (name = "Portfolio", description = "Portfolio valuation, leaderboard and price board")
    ),
    info(
        title = "Stock Game Server",
        description = "Trade execution and portfolio valuation for the multiplayer stock game",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // 로거 초기화 (RUST_LOG가 있으면 우선)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    // DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db, config.clone());

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/api")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.server_addr).await?;

    log::info!("Server running on http://{}", config.server_addr);
    log::info!("Swagger UI available at http://{}/api", config.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
