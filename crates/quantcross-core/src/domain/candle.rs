//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 파이프라인의 기본 데이터 단위를 정의합니다:
//! - `Candle` - OHLCV 캔들스틱 데이터 한 행
//!
//! 시계열은 `Vec<Candle>`로 표현하며, 거래소가 전달한 시간 오름차순
//! 순서를 그대로 유지합니다. 가격 필드는 `f64`입니다. 수익률 계산에서
//! NaN/inf가 데이터로 흘러가야 하므로 고정소수점 타입을 쓰지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV 캔들스틱 데이터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시간 (UTC)
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량 (기준 자산 단위)
    pub volume: f64,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(open_time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 캔들 시작 시간을 epoch 밀리초로 반환합니다.
    pub fn open_time_ms(&self) -> i64 {
        self.open_time.timestamp_millis()
    }
}

/// 시계열에서 종가 컬럼을 추출합니다.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// 시계열이 시간 오름차순인지 확인합니다.
///
/// 거래소가 보장하는 순서를 재정렬 없이 검증만 할 때 사용합니다.
pub fn is_chronological(candles: &[Candle]) -> bool {
    candles
        .windows(2)
        .all(|w| w[0].open_time < w[1].open_time)
}
