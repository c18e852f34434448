//! 백테스팅 엔진
//!
//! 종가 시계열과 포지션 신호로 전략 성과를 시뮬레이션합니다.
//!
//! # 핵심 규칙
//!
//! - **수익률**: `return[i] = close[i] / close[i-1] - 1` (첫 행은 NaN)
//! - **한 기간 지연**: `strategy_return[i] = signal[i-1] * return[i]`.
//!   인덱스 `i`에서 만든 신호는 `i+1` 구간의 수익률에만 적용됩니다.
//!   같은 행의 신호와 수익률을 곱하면 미래를 미리 보는 것이 됩니다.
//! - **누적 수익률**: 성장 계수 `(1 + strategy_return)`의 러닝 곱,
//!   시작값 1.
//!
//! 0 또는 NaN 종가로 생기는 비유한 값은 에러가 아니라 데이터로
//! 전파됩니다. 해당 행 수는 리포트에 집계됩니다.
//!
//! # 사용 예시
//!
//! ```rust
//! use quantcross_analytics::backtest::simulate;
//!
//! let closes = [100.0, 110.0, 99.0];
//! let signals = [1, 1, -1];
//!
//! let report = simulate(&closes, &signals).unwrap();
//! assert!((report.final_cumulative_return() - 0.99).abs() < 1e-9);
//! ```

use thiserror::Error;
use tracing::warn;

/// 백테스트 오류.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// 입력 컬럼 길이 불일치
    #[error("컬럼 길이 불일치: closes={closes}, signals={signals}")]
    LengthMismatch { closes: usize, signals: usize },
}

/// 백테스트 결과 타입.
pub type BacktestResult<T> = Result<T, BacktestError>;

/// 백테스트 결과 컬럼과 요약.
///
/// 모든 컬럼은 입력 시계열과 길이가 같고 인덱스가 정렬되어 있습니다.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    /// 기간 수익률 (첫 행은 NaN)
    pub returns: Vec<f64>,
    /// 지연 적용된 전략 수익률 (첫 행은 0)
    pub strategy_returns: Vec<f64>,
    /// 누적 수익률 (시작값 1)
    pub cumulative: Vec<f64>,
    /// 비유한 전략 수익률이 나온 행 수 (데이터 품질 경고)
    pub nonfinite_rows: usize,
}

impl BacktestReport {
    /// 행 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// 마지막 누적 수익률을 반환합니다.
    ///
    /// 빈 리포트는 시작 자본 그대로인 1.0입니다.
    pub fn final_cumulative_return(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(1.0)
    }
}

/// 종가와 신호 컬럼으로 전략을 시뮬레이션합니다.
///
/// 입력은 수정하지 않으며, 같은 입력은 항상 같은 리포트를 만듭니다.
/// 행이 1개 이하면 수익률을 정의할 수 없으므로 누적 수익률은 1.0으로
/// 끝납니다.
///
/// # Errors
/// 두 컬럼의 길이가 다르면 `BacktestError::LengthMismatch`를 반환합니다.
pub fn simulate(closes: &[f64], signals: &[i8]) -> BacktestResult<BacktestReport> {
    if closes.len() != signals.len() {
        return Err(BacktestError::LengthMismatch {
            closes: closes.len(),
            signals: signals.len(),
        });
    }

    let n = closes.len();
    let mut returns = vec![f64::NAN; n];
    let mut strategy_returns = vec![0.0; n];
    let mut cumulative = vec![1.0; n];
    let mut nonfinite_rows = 0;

    for i in 1..n {
        returns[i] = closes[i] / closes[i - 1] - 1.0;
        strategy_returns[i] = f64::from(signals[i - 1]) * returns[i];
        cumulative[i] = cumulative[i - 1] * (1.0 + strategy_returns[i]);

        if !strategy_returns[i].is_finite() {
            nonfinite_rows += 1;
        }
    }

    if nonfinite_rows > 0 {
        warn!(
            nonfinite_rows,
            rows = n,
            "Backtest produced non-finite strategy returns"
        );
    }

    Ok(BacktestReport {
        returns,
        strategy_returns,
        cumulative,
        nonfinite_rows,
    })
}
