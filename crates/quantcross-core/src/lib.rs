//! # Quantcross Core
//!
//! MA 크로스오버 파이프라인의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 캔들스틱(Kline) 시계열 구조체
//! - 설정 관리 (수집/신호/로깅 기본값)
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use logging::*;
