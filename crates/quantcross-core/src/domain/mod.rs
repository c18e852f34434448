//! 도메인 모델.

pub mod candle;

pub use candle::*;
