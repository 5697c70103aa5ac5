use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::postgres::PgExecutor;
use sqlx::Row;
use std::collections::HashMap;
use uuid::Uuid;
use crate::domains::game::models::{StockGame, StockPriceChange};
use crate::shared::utils::percent_of;

/// 게임별 종목 가격 조회
/// Read-only access to per-game instrument prices
///
/// 가격 쓰기는 외부 가격 시뮬레이터만 합니다. 이 저장소는 조회 전용입니다.
pub struct StockGameRepository;

impl StockGameRepository {
    /// 게임 + 종목 코드로 가격 상태 조회
    pub async fn find_by_game_and_stock<'e, E>(
        executor: E,
        game_id: Uuid,
        stock_code: &str,
    ) -> Result<Option<StockGame>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT id, game_id, stock_code, initial_price, current_price, volatility
            FROM stock_games
            WHERE game_id = $1 AND stock_code = $2
            "#,
        )
        .bind(game_id)
        .bind(stock_code)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch stock price")?;

        Ok(row.map(|r| StockGame {
            id: r.get("id"),
            game_id: r.get("game_id"),
            stock_code: r.get("stock_code"),
            initial_price: r.get("initial_price"),
            current_price: r.get("current_price"),
            volatility: r.get("volatility"),
        }))
    }

    /// 게임의 모든 종목 현재가 (종목 코드 → 가격)
    /// Current prices keyed by stock code
    pub async fn get_current_prices<'e, E>(
        executor: E,
        game_id: Uuid,
    ) -> Result<HashMap<String, Decimal>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT stock_code, current_price
            FROM stock_games
            WHERE game_id = $1
            "#,
        )
        .bind(game_id)
        .fetch_all(executor)
        .await
        .context("Failed to fetch current prices")?;

        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>("stock_code"), r.get::<Decimal, _>("current_price")))
            .collect())
    }

    /// 시세판: 시작가 대비 변동률
    /// Price board with change percent against the initial price
    pub async fn get_price_changes<'e, E>(
        executor: E,
        game_id: Uuid,
    ) -> Result<Vec<StockPriceChange>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT sg.stock_code, t.name, sg.current_price, sg.initial_price
            FROM stock_games sg
            LEFT JOIN stock_templates t ON t.code = sg.stock_code
            WHERE sg.game_id = $1
            ORDER BY sg.stock_code ASC
            "#,
        )
        .bind(game_id)
        .fetch_all(executor)
        .await
        .context("Failed to fetch price changes")?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let current_price: Decimal = r.get("current_price");
                let initial_price: Decimal = r.get("initial_price");
                StockPriceChange {
                    stock_code: r.get("stock_code"),
                    name: r.get("name"),
                    current_price,
                    initial_price,
                    change_percent: percent_of(current_price - initial_price, initial_price),
                }
            })
            .collect())
    }
}
