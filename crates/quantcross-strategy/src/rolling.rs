//! 트레일링 윈도우 이동평균.

use crate::crossover::StrategyError;

/// 트레일링 윈도우 산술 평균을 계산합니다.
///
/// 인덱스 `i`의 값은 `values[i+1-window ..= i]`의 평균입니다.
/// 윈도우가 아직 차지 않은 앞부분(`i < window-1`)은 NaN입니다.
///
/// 윈도우 안에 NaN이 있으면 해당 평균도 NaN이 됩니다. NaN은 에러가
/// 아니라 데이터로 전파됩니다.
///
/// # Errors
/// `window == 0`이면 `StrategyError::InvalidWindow`를 반환합니다.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>, StrategyError> {
    if window == 0 {
        return Err(StrategyError::InvalidWindow(
            "윈도우는 1 이상이어야 합니다".to_string(),
        ));
    }

    let mut means = vec![f64::NAN; values.len()];
    if values.len() < window {
        return Ok(means);
    }

    for i in (window - 1)..values.len() {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        means[i] = sum / window as f64;
    }

    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_one_is_identity() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(rolling_mean(&values, 1).unwrap(), values);
    }

    #[test]
    fn test_trailing_means() {
        let values = vec![10.0, 11.0, 12.0, 11.0, 10.0];
        let means = rolling_mean(&values, 3).unwrap();

        assert!(means[0].is_nan());
        assert!(means[1].is_nan());
        assert_eq!(means[2], 11.0);
        assert!((means[3] - 34.0 / 3.0).abs() < 1e-12);
        assert_eq!(means[4], 11.0);
    }

    #[test]
    fn test_series_shorter_than_window() {
        let means = rolling_mean(&[1.0, 2.0], 5).unwrap();
        assert_eq!(means.len(), 2);
        assert!(means.iter().all(|m| m.is_nan()));
    }

    #[test]
    fn test_empty_series() {
        assert!(rolling_mean(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            rolling_mean(&[1.0], 0),
            Err(StrategyError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_nan_poisons_covering_windows() {
        let values = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let means = rolling_mean(&values, 2).unwrap();

        assert!(means[0].is_nan()); // 워밍업
        assert!(means[1].is_nan()); // NaN 포함
        assert!(means[2].is_nan()); // NaN 포함
        assert_eq!(means[3], 3.5);
        assert_eq!(means[4], 4.5);
    }
}
