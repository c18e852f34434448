//! 이동평균 크로스오버 신호.
//!
//! 단기 이동평균이 장기 이동평균 위에 있으면 +1(롱), 아래에 있으면
//! -1(숏), 어느 쪽도 판정할 수 없으면 0(관망)입니다. 두 평균이 같은
//! 경우와 평균이 아직 정의되지 않은 워밍업 구간 모두 0으로 취급하며
//! 둘을 구분하지 않습니다.

use thiserror::Error;
use tracing::debug;

use crate::rolling::rolling_mean;
use quantcross_core::SignalConfig;

/// 신호 생성 에러.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// 잘못된 윈도우 설정
    #[error("잘못된 윈도우 설정: {0}")]
    InvalidWindow(String),
}

/// 신호 생성 결과 컬럼.
///
/// 모든 컬럼은 입력 시계열과 길이가 같고 인덱스가 정렬되어 있습니다.
#[derive(Debug, Clone)]
pub struct SignalFrame {
    /// 단기 이동평균 (워밍업 구간은 NaN)
    pub ma_short: Vec<f64>,
    /// 장기 이동평균 (워밍업 구간은 NaN)
    pub ma_long: Vec<f64>,
    /// 포지션 신호: +1 롱, -1 숏, 0 관망
    pub signal: Vec<i8>,
}

impl SignalFrame {
    /// 행 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }
}

/// 종가 시계열에서 크로스오버 신호를 생성합니다.
///
/// 장기 윈도우가 차기 전(인덱스 `< long_window - 1`)의 신호는 항상
/// 0입니다. 시계열이 장기 윈도우보다 짧으면 전부 0인 신호가 나오며,
/// 이는 에러가 아닙니다.
///
/// # Errors
/// `short_window == 0`이거나 `long_window <= short_window`이면
/// `StrategyError::InvalidWindow`를 반환합니다.
pub fn generate_signals(
    closes: &[f64],
    config: &SignalConfig,
) -> Result<SignalFrame, StrategyError> {
    if config.short_window == 0 {
        return Err(StrategyError::InvalidWindow(
            "short_window는 1 이상이어야 합니다".to_string(),
        ));
    }
    if config.long_window <= config.short_window {
        return Err(StrategyError::InvalidWindow(format!(
            "long_window({})는 short_window({})보다 커야 합니다",
            config.long_window, config.short_window
        )));
    }

    let ma_short = rolling_mean(closes, config.short_window)?;
    let ma_long = rolling_mean(closes, config.long_window)?;

    // NaN과의 비교는 항상 거짓이므로 워밍업 구간은 자연스럽게 0이 된다
    let signal: Vec<i8> = ma_short
        .iter()
        .zip(ma_long.iter())
        .map(|(s, l)| {
            if s > l {
                1
            } else if s < l {
                -1
            } else {
                0
            }
        })
        .collect();

    let long_rows = signal.iter().filter(|&&s| s == 1).count();
    let short_rows = signal.iter().filter(|&&s| s == -1).count();
    debug!(
        rows = signal.len(),
        long_rows, short_rows, "Generated crossover signals"
    );

    Ok(SignalFrame {
        ma_short,
        ma_long,
        signal,
    })
}
