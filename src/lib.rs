// Stock game trade execution server
// 주식 게임 거래 체결 / 포트폴리오 평가 서버

pub mod domains;
pub mod routes;
pub mod shared;
