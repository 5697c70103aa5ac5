// =====================================================
// 포트폴리오 평가 통합 테스트
// =====================================================

mod common;
use common::*;
use rust_decimal::Decimal;
use stock_game_server::domains::game::models::TradeType;
use uuid::Uuid;

/// 테스트: 포트폴리오 스냅샷은 요청 시점 현재가로 계산
///
/// 저장된 평가 값은 거래 커밋 때만 바뀌고, 조회는 아무것도 저장하지 않습니다.
#[tokio::test]
async fn test_portfolio_snapshot_uses_live_prices() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("holder", START_CAPITAL).await;

    ctx.coordinator()
        .submit(ctx.game_id, player_id, CHKN, TradeType::Buy, 10)
        .await
        .expect("Buy should succeed");
    ctx.set_price(CHKN, Decimal::from(55_000)).await;

    let snapshot = ctx
        .portfolio_service()
        .get_portfolio(ctx.game_id, player_id)
        .await
        .expect("Failed to fetch portfolio")
        .expect("Player should exist");

    assert_eq!(snapshot.cash, 500_000);
    assert_eq!(snapshot.total_asset_value, 1_050_000);
    assert_eq!(snapshot.profit_loss, 50_000);
    assert_eq!(snapshot.profit_rate, Decimal::new(500, 2));

    assert_eq!(snapshot.holdings.len(), 1);
    let chkn = &snapshot.holdings[0];
    assert_eq!(chkn.stock_code, CHKN);
    assert_eq!(chkn.stock_name.as_deref(), Some("치킨"));
    assert_eq!(chkn.current_price, Decimal::from(55_000));
    assert_eq!(chkn.current_value, Decimal::from(550_000));
    assert_eq!(chkn.profit_loss, Decimal::from(50_000));
    assert_eq!(chkn.profit_rate, Decimal::new(1_000, 2));

    // 조회는 저장된 값을 바꾸지 않음 (마지막 거래 시점 값 유지)
    assert_eq!(ctx.stored_valuation_of(player_id).await, (1_000_000, 0, Decimal::ZERO));

    teardown_test(&ctx).await;
}

/// 테스트: 현재가가 없는 종목은 평균 단가로 평가
#[tokio::test]
async fn test_missing_price_falls_back_to_average_price() {
    let Some(ctx) = setup_test().await else { return };
    let player_id = ctx.add_player("orphan", 900_000).await;
    ctx.add_holding(player_id, "GONE", 4, Decimal::from(25_000)).await;

    let snapshot = ctx
        .portfolio_service()
        .get_portfolio(ctx.game_id, player_id)
        .await
        .expect("Failed to fetch portfolio")
        .expect("Player should exist");

    assert_eq!(snapshot.total_asset_value, 1_000_000);
    assert_eq!(snapshot.profit_loss, 0);
    assert_eq!(snapshot.holdings[0].stock_name, None);
    assert_eq!(snapshot.holdings[0].current_price, Decimal::from(25_000));

    // 거래 후 재평가도 같은 규칙으로 저장
    ctx.coordinator()
        .submit(ctx.game_id, player_id, PZZA, TradeType::Buy, 1)
        .await
        .expect("Buy should succeed");
    // 현금 900,000 - 20,001 + GONE 100,000 + PZZA 20,000.50 → 999,999.50 → 1,000,000
    assert_eq!(ctx.stored_valuation_of(player_id).await, (1_000_000, 0, Decimal::ZERO));

    teardown_test(&ctx).await;
}

/// 테스트: 없는 플레이어의 포트폴리오
#[tokio::test]
async fn test_portfolio_of_unknown_player() {
    let Some(ctx) = setup_test().await else { return };

    let snapshot = ctx
        .portfolio_service()
        .get_portfolio(ctx.game_id, Uuid::new_v4())
        .await
        .expect("Failed to fetch portfolio");
    assert!(snapshot.is_none());

    teardown_test(&ctx).await;
}

/// 테스트: 순위표는 총 자산 내림차순
#[tokio::test]
async fn test_leaderboard_orders_by_total_asset_value() {
    let Some(ctx) = setup_test().await else { return };
    let coordinator = ctx.coordinator();
    let winner = ctx.add_player("winner", START_CAPITAL).await;
    let loser = ctx.add_player("loser", START_CAPITAL).await;
    let idle = ctx.add_player("idle", START_CAPITAL).await;

    coordinator.submit(ctx.game_id, winner, CHKN, TradeType::Buy, 10).await.unwrap();
    coordinator.submit(ctx.game_id, loser, PZZA, TradeType::Buy, 10).await.unwrap();

    // 가격 변동 후 거래 1건씩 → 재평가
    ctx.set_price(CHKN, Decimal::from(60_000)).await;
    ctx.set_price(PZZA, Decimal::from(10_000)).await;
    coordinator.submit(ctx.game_id, winner, CHKN, TradeType::Sell, 1).await.unwrap();
    coordinator.submit(ctx.game_id, loser, PZZA, TradeType::Sell, 1).await.unwrap();

    let leaderboard = ctx
        .portfolio_service()
        .get_leaderboard(ctx.game_id)
        .await
        .expect("Failed to fetch leaderboard");

    let order: Vec<Uuid> = leaderboard.iter().map(|e| e.player_id).collect();
    assert_eq!(order, vec![winner, idle, loser]);
    assert_eq!(leaderboard.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(leaderboard[0].total_asset_value, 1_100_000);
    assert!(leaderboard[2].profit_loss < 0);

    teardown_test(&ctx).await;
}

/// 테스트: 시세판 변동률
#[tokio::test]
async fn test_price_board_change_percent() {
    let Some(ctx) = setup_test().await else { return };
    ctx.set_price(CHKN, Decimal::from(52_000)).await;

    let board = ctx
        .portfolio_service()
        .get_price_board(ctx.game_id)
        .await
        .expect("Failed to fetch price board");

    assert_eq!(board.len(), 2);
    let chkn = board.iter().find(|s| s.stock_code == CHKN).expect("CHKN missing");
    assert_eq!(chkn.initial_price, Decimal::from(50_000));
    assert_eq!(chkn.change_percent, Decimal::new(400, 2));
    let pzza = board.iter().find(|s| s.stock_code == PZZA).expect("PZZA missing");
    assert_eq!(pzza.change_percent, Decimal::ZERO);

    teardown_test(&ctx).await;
}
