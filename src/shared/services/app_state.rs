use crate::shared::config::AppConfig;
use crate::shared::database::Database;
use crate::domains::game::services::state::GameState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub config: AppConfig,
    pub game_state: GameState,
}

impl AppState {
    /// Create AppState with database and configuration
    pub fn new(db: Database, config: AppConfig) -> Self {
        let game_state = GameState::new(db.clone(), config.clone());

        Self {
            db,
            config,
            game_state,
        }
    }
}
