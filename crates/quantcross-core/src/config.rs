//! 설정 관리.
//!
//! 이 모듈은 파이프라인 설정을 정의하고 관리합니다.
//!
//! 모든 기본값은 코드에 숨긴 상수가 아니라 설정 필드의 문서화된
//! 기본값입니다. 파일 없이 실행하면 기본값(BTCUSDT, 1h, 1000 캔들,
//! 5/20 이동평균)으로 동작합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 시세 수집 설정
    #[serde(default)]
    pub fetch: FetchConfig,
    /// 신호 생성 설정
    #[serde(default)]
    pub signal: SignalConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 시세 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// 거래 심볼 (예: BTCUSDT)
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// 캔들 간격 토큰 (예: 1m, 1h, 1d)
    ///
    /// 로컬에서 검증하지 않고 거래소에 그대로 전달합니다.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// 요청 캔들 수 (1~1000)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// REST API 기본 URL
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    /// 저장 파일 경로
    #[serde(default = "default_output")]
    pub output: String,
}

// 설정 기본값 함수들 (serde default용)
fn default_symbol() -> String {
    "BTCUSDT".to_string()
}
fn default_interval() -> String {
    "1h".to_string()
}
fn default_limit() -> usize {
    1000
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_rest_base_url() -> String {
    "https://api.binance.com".to_string()
}
fn default_output() -> String {
    "data/btcusdt_1h.csv".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            interval: default_interval(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            rest_base_url: default_rest_base_url(),
            output: default_output(),
        }
    }
}

/// 신호 생성 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalConfig {
    /// 단기 이동평균 윈도우
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// 장기 이동평균 윈도우 (단기보다 커야 함)
    #[serde(default = "default_long_window")]
    pub long_window: usize,
}

fn default_short_window() -> usize {
    5
}
fn default_long_window() -> usize {
    20
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값에서 시작하고, 환경 변수
    /// (`QUANTCROSS__` 접두사, `__` 구분자)로 오버라이드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드 (없으면 무시)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("QUANTCROSS")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
