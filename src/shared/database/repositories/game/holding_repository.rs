use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::Row;
use uuid::Uuid;
use crate::domains::game::models::Holding;

pub struct HoldingRepository;

impl HoldingRepository {
    /// 플레이어 + 종목으로 보유 주식 조회
    /// Get holding by player and stock code
    pub async fn find_by_player_and_stock<'e, E>(
        executor: E,
        player_id: Uuid,
        stock_code: &str,
    ) -> Result<Option<Holding>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, stock_code, quantity, average_price, updated_at
            FROM holdings
            WHERE player_id = $1 AND stock_code = $2
            "#,
        )
        .bind(player_id)
        .bind(stock_code)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch holding by player and stock")?;

        Ok(row.map(|r| row_to_holding(&r)))
    }

    /// 플레이어의 모든 보유 주식 조회 (종목 코드 순)
    /// Get all holdings for a player
    pub async fn find_by_player<'e, E>(executor: E, player_id: Uuid) -> Result<Vec<Holding>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, stock_code, quantity, average_price, updated_at
            FROM holdings
            WHERE player_id = $1
            ORDER BY stock_code ASC
            "#,
        )
        .bind(player_id)
        .fetch_all(executor)
        .await
        .context("Failed to fetch holdings by player")?;

        Ok(rows.iter().map(row_to_holding).collect())
    }

    /// 보유 주식 + 종목명 조회 (포트폴리오 표시용)
    /// Get holdings joined with the stock template name
    pub async fn find_by_player_with_names<'e, E>(
        executor: E,
        player_id: Uuid,
    ) -> Result<Vec<(Holding, Option<String>)>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT h.id, h.player_id, h.stock_code, h.quantity, h.average_price, h.updated_at,
                   t.name AS stock_name
            FROM holdings h
            LEFT JOIN stock_templates t ON t.code = h.stock_code
            WHERE h.player_id = $1
            ORDER BY h.stock_code ASC
            "#,
        )
        .bind(player_id)
        .fetch_all(executor)
        .await
        .context("Failed to fetch holdings with names")?;

        Ok(rows
            .iter()
            .map(|r| (row_to_holding(r), r.get::<Option<String>, _>("stock_name")))
            .collect())
    }

    /// 신규 보유 주식 생성 (첫 매수)
    /// Create a holding on the first buy of a stock
    pub async fn create<'e, E>(
        executor: E,
        player_id: Uuid,
        stock_code: &str,
        quantity: i32,
        average_price: Decimal,
    ) -> Result<Holding>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            INSERT INTO holdings (id, player_id, stock_code, quantity, average_price, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, player_id, stock_code, quantity, average_price, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(player_id)
        .bind(stock_code)
        .bind(quantity)
        .bind(average_price)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .context("Failed to create holding")?;

        Ok(row_to_holding(&row))
    }

    /// 수량 + 평균 단가 갱신 (추가 매수)
    /// Update quantity and average price
    pub async fn update<'e, E>(
        executor: E,
        holding_id: Uuid,
        quantity: i32,
        average_price: Decimal,
    ) -> Result<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            UPDATE holdings
            SET quantity = $1, average_price = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(quantity)
        .bind(average_price)
        .bind(Utc::now())
        .bind(holding_id)
        .execute(executor)
        .await
        .context("Failed to update holding")?;

        Ok(())
    }

    /// 수량만 갱신 (일부 매도, 평균 단가 유지)
    /// Update quantity only
    pub async fn update_quantity<'e, E>(executor: E, holding_id: Uuid, quantity: i32) -> Result<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            UPDATE holdings
            SET quantity = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(holding_id)
        .execute(executor)
        .await
        .context("Failed to update holding quantity")?;

        Ok(())
    }

    /// 보유 주식 삭제 (전량 매도)
    /// Delete a holding after the last share is sold
    pub async fn delete<'e, E>(executor: E, holding_id: Uuid) -> Result<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("DELETE FROM holdings WHERE id = $1")
            .bind(holding_id)
            .execute(executor)
            .await
            .context("Failed to delete holding")?;

        Ok(())
    }
}

fn row_to_holding(row: &PgRow) -> Holding {
    Holding {
        id: row.get("id"),
        player_id: row.get("player_id"),
        stock_code: row.get("stock_code"),
        quantity: row.get("quantity"),
        average_price: row.get("average_price"),
        updated_at: row.get("updated_at"),
    }
}
