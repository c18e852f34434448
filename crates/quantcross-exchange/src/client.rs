//! Binance 시세 클라이언트.
//!
//! Binance Spot 공개 REST API에서 캔들스틱(kline) 데이터를 가져옵니다.
//! 인증이 필요 없는 공개 엔드포인트만 사용합니다.

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{ExchangeError, ExchangeResult};
use quantcross_core::{is_chronological, Candle, FetchConfig};

/// 한 번의 요청으로 가져올 수 있는 최대 캔들 수 (Binance 제한).
pub const MAX_KLINE_LIMIT: usize = 1000;

// ============================================================================
// 설정
// ============================================================================

/// Binance 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// REST API 기본 URL
    pub rest_base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            rest_base_url: "https://api.binance.com".to_string(),
            timeout_secs: 5,
        }
    }
}

impl BinanceConfig {
    /// 새 설정 생성.
    pub fn new(rest_base_url: impl Into<String>) -> Self {
        Self {
            rest_base_url: rest_base_url.into(),
            ..Default::default()
        }
    }

    /// 요청 타임아웃 설정.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl From<&FetchConfig> for BinanceConfig {
    fn from(config: &FetchConfig) -> Self {
        Self::new(&config.rest_base_url).with_timeout_secs(config.timeout_secs)
    }
}

// ============================================================================
// API 응답 타입
// ============================================================================

/// kline 가격/거래량 셀.
///
/// Binance는 이 필드들을 문자열로 보내지만, 호환 API가 JSON 숫자로
/// 보내는 경우도 그대로 수용합니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceCell {
    Text(String),
    Number(f64),
}

/// Binance kline 응답의 위치 기반 배열 한 행.
#[derive(Debug, Deserialize)]
#[allow(dead_code)] // API 응답 필드 전체 매핑 (일부만 사용)
struct BinanceKline(
    i64,       // 0: Open time
    PriceCell, // 1: Open
    PriceCell, // 2: High
    PriceCell, // 3: Low
    PriceCell, // 4: Close
    PriceCell, // 5: Volume
    i64,       // 6: Close time
    PriceCell, // 7: Quote asset volume
    i64,       // 8: Number of trades
    PriceCell, // 9: Taker buy base asset volume
    PriceCell, // 10: Taker buy quote asset volume
    PriceCell, // 11: Ignore
);

#[derive(Debug, Deserialize)]
struct BinanceErrorBody {
    #[allow(dead_code)]
    code: i32,
    msg: String,
}

// ============================================================================
// Binance 클라이언트
// ============================================================================

/// Binance 시세 클라이언트.
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// 새 Binance 클라이언트 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::Network`를 반환합니다.
    pub fn new(config: BinanceConfig) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 파라미터에서 쿼리 문자열 생성.
    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 공개 API 요청 (인증 불필요).
    async fn public_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.config.rest_base_url, endpoint);
        let query = Self::build_query(params);

        let full_url = if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        };

        debug!("GET {}", full_url);

        let response = self
            .client
            .get(&full_url)
            .send()
            .await
            .map_err(ExchangeError::from)?;

        self.handle_response(response).await
    }

    /// API 응답 처리.
    ///
    /// 상태 코드를 본문 파싱보다 먼저 판정합니다. 에러 상태의 본문은
    /// 메시지 추출에만 사용하고 kline으로 해석하지 않습니다.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> ExchangeResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(ExchangeError::from)?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                error!("Failed to parse response: {} - Body: {}", e, body);
                ExchangeError::Parse(e.to_string())
            })
        } else {
            // 에러 응답 본문에서 메시지 추출 시도
            let message = match serde_json::from_str::<BinanceErrorBody>(&body) {
                Ok(err_body) => err_body.msg,
                Err(_) => body,
            };
            Err(ExchangeError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// 캔들스틱 시계열을 가져옵니다.
    ///
    /// `symbol`과 `interval`은 검증 없이 거래소에 그대로 전달합니다.
    /// 유효성 판단은 거래소 몫이며, 잘못된 값은 에러 상태 코드로
    /// 돌아옵니다. `limit`은 전송 전에 로컬에서 검증합니다.
    ///
    /// 요청은 정확히 한 번이며, 응답 행 수는 `limit` 이하일 수 있습니다
    /// (상장 직후 심볼 등). 행 순서는 거래소가 준 그대로 유지합니다.
    ///
    /// # Errors
    /// - `InvalidRequest` - `limit`이 1..=1000 범위를 벗어남 (요청 미전송)
    /// - `Timeout` - 설정된 마감시간 초과
    /// - `Network` - DNS/TCP/TLS 등 전송 실패
    /// - `Api` - HTTP 에러 상태 (429, 5xx 등)
    /// - `Parse` - 2xx 본문이 kline 배열 또는 숫자로 해석되지 않음
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> ExchangeResult<Vec<Candle>> {
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            return Err(ExchangeError::InvalidRequest(format!(
                "limit은 1..={} 범위여야 합니다 (요청값: {})",
                MAX_KLINE_LIMIT, limit
            )));
        }

        info!(symbol, interval, limit, "Fetching klines");

        let rows: Vec<BinanceKline> = self
            .public_get(
                "/api/v3/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let candles = rows
            .into_iter()
            .map(|k| {
                let open_time = DateTime::from_timestamp_millis(k.0).ok_or_else(|| {
                    ExchangeError::Parse(format!("유효하지 않은 open_time: {}", k.0))
                })?;
                Ok(Candle::new(
                    open_time,
                    Self::parse_price(&k.1)?,
                    Self::parse_price(&k.2)?,
                    Self::parse_price(&k.3)?,
                    Self::parse_price(&k.4)?,
                    Self::parse_price(&k.5)?,
                ))
            })
            .collect::<ExchangeResult<Vec<Candle>>>()?;

        if !is_chronological(&candles) {
            warn!(
                symbol,
                "Exchange returned out-of-order rows; keeping original order"
            );
        }

        debug!("Fetched {} klines for {}", candles.len(), symbol);

        Ok(candles)
    }

    /// 가격 셀을 f64로 변환. 문자열 셀은 엄격하게 파싱합니다.
    fn parse_price(cell: &PriceCell) -> ExchangeResult<f64> {
        match cell {
            PriceCell::Text(s) => s
                .parse::<f64>()
                .map_err(|e| ExchangeError::Parse(format!("숫자 파싱 실패 '{}': {}", s, e))),
            PriceCell::Number(v) => Ok(*v),
        }
    }
}
