//! 백테스트 모듈.

pub mod engine;

pub use engine::{simulate, BacktestError, BacktestReport, BacktestResult};
