//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 캔들 데이터 수집 및 CSV 저장
//! - CSV 기반 백테스트 실행
//! - 설정 관리

pub mod commands;

pub use commands::*;
