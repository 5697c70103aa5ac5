// =====================================================
// 동시성 통합 테스트
// =====================================================
// 같은 플레이어의 거래는 플레이어 행 락으로 직렬화되고,
// 다른 플레이어의 거래는 서로 막지 않아야 합니다.
// =====================================================

mod common;
use common::*;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use stock_game_server::domains::game::engine::TradeCoordinator;
use stock_game_server::domains::game::models::TradeType;
use stock_game_server::shared::config::AppConfig;
use stock_game_server::shared::errors::{TradeError, TradeRejection};
use uuid::Uuid;

const CONCURRENT_REQUESTS: usize = 8;

/// 테스트: 같은 보유분 전량 매도 N건 동시 제출
///
/// 정확히 1건만 성공하고 나머지 N-1건은 InsufficientStock 으로 거절됩니다.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_full_sells_single_winner() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("seller", START_CAPITAL).await;

    ctx.coordinator()
        .submit(ctx.game_id, player_id, CHKN, TradeType::Buy, 10)
        .await
        .expect("Setup buy should succeed");

    let handles = (0..CONCURRENT_REQUESTS).map(|_| {
        let coordinator = ctx.coordinator();
        let game_id = ctx.game_id;
        tokio::spawn(async move {
            coordinator
                .submit(game_id, player_id, CHKN, TradeType::Sell, 10)
                .await
        })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let insufficient = results
        .iter()
        .filter(|r| {
            matches!(
                r.as_ref().err().and_then(|e| e.rejection()),
                Some(TradeRejection::InsufficientStock { required: 10, available: 0 })
            )
        })
        .count();

    assert_eq!(successes, 1);
    assert_eq!(insufficient, CONCURRENT_REQUESTS - 1);
    assert_eq!(ctx.holding_of(player_id, CHKN).await, None);
    assert_eq!(ctx.cash_of(player_id).await, START_CAPITAL);
    assert_eq!(ctx.trade_count_of(player_id).await, 2);

    teardown_test(&ctx).await;
}

/// 테스트: 같은 플레이어 동시 매수
///
/// 250,000원으로 50,000원짜리 1주 매수 8건 → 정확히 5건 성공, 현금 0
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_buys_never_overdraw() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("buyer", 250_000).await;

    let handles = (0..CONCURRENT_REQUESTS).map(|_| {
        let coordinator = ctx.coordinator();
        let game_id = ctx.game_id;
        tokio::spawn(async move {
            coordinator
                .submit(game_id, player_id, CHKN, TradeType::Buy, 1)
                .await
        })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 5);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.code() == "INSUFFICIENT_FUNDS"));
    assert_eq!(ctx.cash_of(player_id).await, 0);
    assert_eq!(ctx.holding_of(player_id, CHKN).await, Some((5, Decimal::from(50_000))));

    teardown_test(&ctx).await;
}

/// 테스트: 다른 플레이어는 병렬로 처리
///
/// 서로 다른 플레이어의 매수는 모두 성공해야 합니다.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_players_trade_in_parallel() {
    let Some(ctx) = setup_test().await else { return };

    let mut player_ids = Vec::new();
    for i in 0..CONCURRENT_REQUESTS {
        player_ids.push(ctx.add_player(&format!("p{}", i), START_CAPITAL).await);
    }

    let handles = player_ids.iter().map(|&player_id| {
        let coordinator = ctx.coordinator();
        let game_id = ctx.game_id;
        tokio::spawn(async move {
            coordinator
                .submit(game_id, player_id, CHKN, TradeType::Buy, 3)
                .await
        })
    });

    let results = join_all(handles).await;
    assert!(results.into_iter().all(|r| matches!(r, Ok(Ok(_)))));

    for player_id in player_ids {
        assert_eq!(ctx.cash_of(player_id).await, START_CAPITAL - 150_000);
        assert_eq!(ctx.holding_of(player_id, CHKN).await, Some((3, Decimal::from(50_000))));
    }

    teardown_test(&ctx).await;
}

/// 다른 트랜잭션이 플레이어 행 락을 잡고 있는 상태를 만듭니다.
async fn hold_player_lock(ctx: &TestContext, player_id: Uuid) -> sqlx::Transaction<'static, sqlx::Postgres> {
    let mut blocker = ctx.db.pool().begin().await.expect("Failed to begin blocker");
    sqlx::query("SELECT id FROM players WHERE id = $1 FOR UPDATE")
        .bind(player_id)
        .fetch_one(&mut *blocker)
        .await
        .expect("Failed to lock player row");
    blocker
}

/// 테스트: 락 대기 시간 초과
///
/// lock_timeout 이 지나면 TRY_AGAIN 으로 실패하고 아무것도 바뀌지 않습니다.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_lock_timeout_rolls_back_as_try_again() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("locked", START_CAPITAL).await;

    let coordinator = TradeCoordinator::new(
        ctx.db.clone(),
        AppConfig { lock_timeout_ms: 200, ..ctx.config.clone() },
    );

    let blocker = hold_player_lock(&ctx, player_id).await;
    let err = coordinator
        .submit(ctx.game_id, player_id, CHKN, TradeType::Buy, 1)
        .await
        .expect_err("Trade should fail while the row is locked");
    blocker.rollback().await.expect("Failed to release blocker");

    assert_eq!(err.code(), "TRY_AGAIN");
    assert!(err.rejection().is_none());
    assert_eq!(ctx.cash_of(player_id).await, START_CAPITAL);
    assert_eq!(ctx.holding_of(player_id, CHKN).await, None);
    assert_eq!(ctx.trade_count_of(player_id).await, 0);

    teardown_test(&ctx).await;
}

/// 테스트: 전체 거래 시간 초과
///
/// trade_timeout 이 먼저 끝나면 TRY_AGAIN 으로 실패하고,
/// 락이 풀린 뒤의 다음 거래는 정상 처리됩니다 (열린 트랜잭션이 남지 않음).
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_trade_timeout_rolls_back_and_recovers() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("slow", START_CAPITAL).await;

    let coordinator = TradeCoordinator::new(
        ctx.db.clone(),
        AppConfig { lock_timeout_ms: 5_000, trade_timeout_ms: 200, ..ctx.config.clone() },
    );

    let blocker = hold_player_lock(&ctx, player_id).await;
    let err = coordinator
        .submit(ctx.game_id, player_id, CHKN, TradeType::Buy, 1)
        .await
        .expect_err("Trade should time out while the row is locked");
    blocker.rollback().await.expect("Failed to release blocker");

    assert!(matches!(err, TradeError::Timeout(200)));
    assert_eq!(err.code(), "TRY_AGAIN");
    assert_eq!(ctx.cash_of(player_id).await, START_CAPITAL);
    assert_eq!(ctx.trade_count_of(player_id).await, 0);

    // 여러 번 제출해도 풀의 연결이 모두 정상이어야 함
    for _ in 0..3 {
        ctx.coordinator()
            .submit(ctx.game_id, player_id, CHKN, TradeType::Buy, 1)
            .await
            .expect("Follow-up trade should succeed");
    }

    assert_eq!(ctx.cash_of(player_id).await, START_CAPITAL - 150_000);
    assert_eq!(ctx.holding_of(player_id, CHKN).await, Some((3, chkn_price())));
    assert_eq!(ctx.trade_count_of(player_id).await, 3);

    teardown_test(&ctx).await;
}
