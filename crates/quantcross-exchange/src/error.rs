//! 거래소 에러 타입.

use thiserror::Error;

/// 거래소 관련 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 요청 전 로컬 검증 실패 (요청은 전송되지 않음)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 타임아웃 (연결 또는 응답 대기 중 마감 초과)
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 네트워크/연결 에러 (DNS, TCP, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 에러 상태 코드 (본문 파싱 전에 판정)
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    Parse(String),
}

/// 거래소 작업 결과 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    /// 재시도 가능한 에러인지 확인.
    ///
    /// 이 클라이언트는 스스로 재시도하지 않습니다. 호출자 판단용입니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Timeout(_) | ExchangeError::Network(_) => true,
            ExchangeError::Api { status, .. } => {
                *status == 429 || *status == 418 || *status >= 500
            }
            _ => false,
        }
    }

    /// 응답의 HTTP 상태 코드 반환 (있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Timeout(err.to_string())
        } else {
            // 연결 거부, DNS 실패, TLS 에러 등 전송 계층 전반
            ExchangeError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Parse(err.to_string())
    }
}
