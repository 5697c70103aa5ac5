use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::Row;
use uuid::Uuid;
use crate::domains::game::models::{Trade, TradeCreate, TradeType, TradingStats};

const TRADE_COLUMNS: &str = r#"
    id, game_id, player_id, stock_code, trade_type, quantity, price, total_amount, executed_at
"#;

/// 거래 원장 저장소 (append-only)
/// Trade ledger repository, insert and read only
pub struct TradeRepository;

impl TradeRepository {
    /// 체결 내역 추가
    /// Append a trade record
    pub async fn create<'e, E>(executor: E, trade_create: &TradeCreate) -> Result<Trade>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO trades (
                id, game_id, player_id, stock_code, trade_type,
                quantity, price, total_amount, executed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            TRADE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(trade_create.game_id)
            .bind(trade_create.player_id)
            .bind(&trade_create.stock_code)
            .bind(trade_create.trade_type.as_str())
            .bind(trade_create.quantity)
            .bind(trade_create.price)
            .bind(trade_create.total_amount)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
            .context("Failed to create trade")?;

        row_to_trade(&row)
    }

    /// 플레이어의 거래 내역 (최신순)
    /// Trade history of one player in one game, newest first
    pub async fn find_by_game_and_player<'e, E>(
        executor: E,
        game_id: Uuid,
        player_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Trade>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {}
            FROM trades
            WHERE game_id = $1 AND player_id = $2
            ORDER BY executed_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
            TRADE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(game_id)
            .bind(player_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
            .context("Failed to fetch trades by game and player")?;

        rows.iter().map(row_to_trade).collect()
    }

    /// 게임 전체 거래 내역 (최신순)
    /// Trades of a whole game, newest first
    pub async fn find_by_game<'e, E>(executor: E, game_id: Uuid, limit: i64) -> Result<Vec<Trade>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {}
            FROM trades
            WHERE game_id = $1
            ORDER BY executed_at DESC, id DESC
            LIMIT $2
            "#,
            TRADE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(game_id)
            .bind(limit)
            .fetch_all(executor)
            .await
            .context("Failed to fetch trades by game")?;

        rows.iter().map(row_to_trade).collect()
    }

    /// 종목별 거래 내역 (최신순)
    pub async fn find_by_stock<'e, E>(
        executor: E,
        game_id: Uuid,
        stock_code: &str,
        limit: i64,
    ) -> Result<Vec<Trade>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {}
            FROM trades
            WHERE game_id = $1 AND stock_code = $2
            ORDER BY executed_at DESC, id DESC
            LIMIT $3
            "#,
            TRADE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(game_id)
            .bind(stock_code)
            .bind(limit)
            .fetch_all(executor)
            .await
            .context("Failed to fetch trades by stock")?;

        rows.iter().map(row_to_trade).collect()
    }

    /// 종목 총 거래량 (수량 합계)
    /// Total traded quantity of a stock in a game
    pub async fn get_total_trade_volume<'e, E>(
        executor: E,
        game_id: Uuid,
        stock_code: &str,
    ) -> Result<i64>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(quantity), 0)::BIGINT AS total
            FROM trades
            WHERE game_id = $1 AND stock_code = $2
            "#,
        )
        .bind(game_id)
        .bind(stock_code)
        .fetch_one(executor)
        .await
        .context("Failed to fetch total trade volume")?;

        Ok(row.get("total"))
    }

    /// 플레이어 거래 통계
    /// Aggregate trading statistics for one player
    pub async fn get_player_stats<'e, E>(
        executor: E,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<TradingStats>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_trades,
                   COUNT(*) FILTER (WHERE trade_type = 'BUY') AS buy_trades,
                   COUNT(*) FILTER (WHERE trade_type = 'SELL') AS sell_trades,
                   COALESCE(SUM(total_amount) FILTER (WHERE trade_type = 'BUY'), 0) AS total_buy_volume,
                   COALESCE(SUM(total_amount) FILTER (WHERE trade_type = 'SELL'), 0) AS total_sell_volume
            FROM trades
            WHERE game_id = $1 AND player_id = $2
            "#,
        )
        .bind(game_id)
        .bind(player_id)
        .fetch_one(executor)
        .await
        .context("Failed to fetch player trading stats")?;

        let total_buy_volume: Decimal = row.get("total_buy_volume");
        let total_sell_volume: Decimal = row.get("total_sell_volume");

        Ok(TradingStats {
            total_trades: row.get("total_trades"),
            buy_trades: row.get("buy_trades"),
            sell_trades: row.get("sell_trades"),
            total_buy_volume,
            total_sell_volume,
            net_volume: total_sell_volume - total_buy_volume,
        })
    }
}

fn row_to_trade(row: &PgRow) -> Result<Trade> {
    let trade_type: String = row.get("trade_type");

    Ok(Trade {
        id: row.get("id"),
        game_id: row.get("game_id"),
        player_id: row.get("player_id"),
        stock_code: row.get("stock_code"),
        trade_type: trade_type.parse::<TradeType>()?,
        quantity: row.get("quantity"),
        price: row.get("price"),
        total_amount: row.get("total_amount"),
        executed_at: row.get("executed_at"),
    })
}
