// =====================================================
// 거래 엔진 모듈
// Trade Engine Module
// =====================================================
// 매수/매도 한 건을 원자적으로 처리합니다.
//
// 구조:
// - validator  : 순수 검증 (I/O 없음, 사전 검증 API에서도 재사용)
// - executor   : 현금/보유 주식 변경 (호출자가 준 트랜잭션 안에서)
// - valuator   : 총 자산/손익/수익률 재계산
// - coordinator: 유일한 변경 진입점 (락 → 검증 → 실행 → 원장 → 평가 → 커밋)
//
// 동시성:
// - 거래 한 건 = DB 트랜잭션 하나
// - 같은 플레이어의 거래는 플레이어 행 락으로 직렬화
// - 다른 플레이어끼리는 공유 락 없이 병렬 처리
// =====================================================

pub mod validator;
pub mod executor;
pub mod valuator;
pub mod coordinator;

pub use validator::{validate, ValidatedTrade};
pub use executor::{ExecutionOutcome, HoldingChange, TradeExecutor};
pub use valuator::PortfolioValuator;
pub use coordinator::TradeCoordinator;
