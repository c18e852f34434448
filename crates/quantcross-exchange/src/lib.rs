//! # Quantcross Exchange
//!
//! Binance 공개 REST API에서 캔들스틱 시계열을 수집합니다.
//!
//! 이 크레이트는 파이프라인의 데이터 입구입니다:
//! - `BinanceClient` - /api/v3/klines 단건 요청 클라이언트
//! - `ExchangeError` - 타임아웃/네트워크/상태코드/파싱 에러 구분
//!
//! 요청은 호출당 정확히 한 번이며 재시도, 페이지네이션, 캐시는 없습니다.

pub mod client;
pub mod error;

pub use client::{BinanceClient, BinanceConfig, MAX_KLINE_LIMIT};
pub use error::{ExchangeError, ExchangeResult};
