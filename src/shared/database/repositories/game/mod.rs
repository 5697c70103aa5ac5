// Game trading repositories
//
// 모든 함수는 `PgExecutor`를 받습니다:
// - 조회 API: `db.pool()` 전달 (락 없음)
// - 거래 트랜잭션: `&mut *tx` 전달 (같은 작업 단위 안에서 실행)
pub mod game_repository;
pub mod player_repository;
pub mod holding_repository;
pub mod stock_game_repository;
pub mod trade_repository;

pub use game_repository::*;
pub use player_repository::*;
pub use holding_repository::*;
pub use stock_game_repository::*;
pub use trade_repository::*;
