use anyhow::{Context, Result};
use sqlx::postgres::PgExecutor;
use sqlx::Row;
use uuid::Uuid;

/// 게임 테이블 조회 (게임 생성/진행은 외부 로비가 담당)
/// Read-only access to the games table
pub struct GameRepository;

impl GameRepository {
    /// 게임 시작 자본 조회
    /// Get the game's starting capital (fixed at game creation)
    pub async fn get_start_capital<'e, E>(executor: E, game_id: Uuid) -> Result<Option<i64>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT start_capital
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(game_id)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch game start capital")?;

        Ok(row.map(|r| r.get::<i64, _>("start_capital")))
    }
}
