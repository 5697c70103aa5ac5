/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 금액/비율 반올림 규칙 (money)
pub mod money;

pub use money::*;
