//! 벡터화된 단일 자산 백테스트.
//!
//! 이 크레이트가 제공하는 기능:
//! - 종가와 신호 컬럼으로부터 기간 수익률/전략 수익률/누적 수익률 계산
//! - 신호를 한 기간 늦게 적용하는 룩어헤드 방지 시뮬레이션

pub mod backtest;

// 주요 타입 재내보내기
pub use backtest::{simulate, BacktestError, BacktestReport, BacktestResult};
