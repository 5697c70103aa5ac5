use anyhow::{Context, Result};
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::Row;
use uuid::Uuid;
use crate::domains::game::models::{LeaderboardEntry, Player, Valuation};

const PLAYER_COLUMNS: &str = r#"
    id, game_id, user_id, nickname, current_cash, total_asset_value,
    profit_loss, profit_rate, ranking, is_ready, is_connected, joined_at
"#;

pub struct PlayerRepository;

impl PlayerRepository {
    /// 플레이어 조회 + 배타적 행 락 (SELECT ... FOR UPDATE)
    /// Fetch the player row and take a pessimistic write lock on it
    ///
    /// 락은 트랜잭션이 커밋/롤백될 때 자동으로 해제됩니다.
    /// 같은 플레이어의 두 번째 거래는 여기서 대기합니다.
    pub async fn find_for_update<'e, E>(
        executor: E,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<Option<Player>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT {} FROM players WHERE id = $1 AND game_id = $2 FOR UPDATE",
            PLAYER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(player_id)
            .bind(game_id)
            .fetch_optional(executor)
            .await
            .context("Failed to lock player row")?;

        Ok(row.map(|r| row_to_player(&r)))
    }

    /// 플레이어 조회 (락 없음)
    /// Get player by id within a game
    pub async fn find_by_id<'e, E>(
        executor: E,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<Option<Player>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT {} FROM players WHERE id = $1 AND game_id = $2",
            PLAYER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(player_id)
            .bind(game_id)
            .fetch_optional(executor)
            .await
            .context("Failed to fetch player")?;

        Ok(row.map(|r| row_to_player(&r)))
    }

    /// 현금 증감 (원자적 UPDATE)
    /// Apply a signed cash delta, returns the new balance
    ///
    /// current_cash >= 0 CHECK 제약이 마지막 방어선입니다.
    pub async fn adjust_cash<'e, E>(executor: E, player_id: Uuid, delta: i64) -> Result<i64>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            UPDATE players
            SET current_cash = current_cash + $1
            WHERE id = $2
            RETURNING current_cash
            "#,
        )
        .bind(delta)
        .bind(player_id)
        .fetch_optional(executor)
        .await
        .context("Failed to update player cash")?;

        row.map(|r| r.get::<i64, _>("current_cash"))
            .context("Player row missing while updating cash")
    }

    /// 평가 결과 저장
    /// Persist derived valuation fields
    ///
    /// # Returns
    /// * `Ok(true)` - 저장됨
    /// * `Ok(false)` - 플레이어 행이 이미 없음 (퇴장 경합, 무시)
    pub async fn update_valuation<'e, E>(
        executor: E,
        player_id: Uuid,
        valuation: &Valuation,
    ) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE players
            SET total_asset_value = $1,
                profit_loss = $2,
                profit_rate = $3
            WHERE id = $4
            "#,
        )
        .bind(valuation.total_asset_value)
        .bind(valuation.profit_loss)
        .bind(valuation.profit_rate)
        .bind(player_id)
        .execute(executor)
        .await
        .context("Failed to update player valuation")?;

        Ok(result.rows_affected() > 0)
    }

    /// 게임 순위표 (총 자산 내림차순, 순위는 조회 시점에 계산)
    /// Leaderboard ordered by total asset value
    pub async fn get_leaderboard<'e, E>(executor: E, game_id: Uuid) -> Result<Vec<LeaderboardEntry>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT RANK() OVER (ORDER BY total_asset_value DESC) AS rank,
                   id, nickname, total_asset_value, profit_loss, profit_rate
            FROM players
            WHERE game_id = $1
            ORDER BY rank ASC, joined_at ASC
            "#,
        )
        .bind(game_id)
        .fetch_all(executor)
        .await
        .context("Failed to fetch leaderboard")?;

        Ok(rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                rank: row.get("rank"),
                player_id: row.get("id"),
                nickname: row.get("nickname"),
                total_asset_value: row.get("total_asset_value"),
                profit_loss: row.get("profit_loss"),
                profit_rate: row.get("profit_rate"),
            })
            .collect())
    }
}

fn row_to_player(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        game_id: row.get("game_id"),
        user_id: row.get("user_id"),
        nickname: row.get("nickname"),
        current_cash: row.get("current_cash"),
        total_asset_value: row.get("total_asset_value"),
        profit_loss: row.get("profit_loss"),
        profit_rate: row.get("profit_rate"),
        ranking: row.get("ranking"),
        is_ready: row.get("is_ready"),
        is_connected: row.get("is_connected"),
        joined_at: row.get("joined_at"),
    }
}
