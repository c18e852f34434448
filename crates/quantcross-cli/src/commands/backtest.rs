//! 백테스트 명령어.
//!
//! CSV 파일에서 캔들 시계열을 읽어 MA 크로스오버 신호를 만들고
//! 수익률 시뮬레이션을 실행합니다. 입력 형식은 `fetch` 명령어가
//! 저장하는 6컬럼 레이아웃 또는 `open_time,close` 2컬럼 레이아웃입니다.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use std::path::Path;
use tracing::{info, warn};

use quantcross_analytics::simulate;
use quantcross_core::{closes, Candle, SignalConfig};
use quantcross_strategy::generate_signals;

/// 백테스트 실행 결과 요약.
#[derive(Debug, Clone)]
pub struct BacktestSummary {
    /// 입력 행 수
    pub rows: usize,
    /// 롱 신호 행 수
    pub long_rows: usize,
    /// 숏 신호 행 수
    pub short_rows: usize,
    /// NaN/inf 전략 수익률 행 수
    pub nonfinite_rows: usize,
    /// 최종 누적 수익률 (1.0 = 본전)
    pub final_cumulative_return: f64,
}

/// CSV 파일에서 캔들 시계열을 로드합니다.
///
/// 예상 형식: `open_time,open,high,low,close,volume` 또는 `open_time,close`.
/// 타임스탬프가 깨진 행은 에러이고, 가격 셀이 깨진 행은 NaN으로
/// 흘려보냅니다. NaN은 이후 단계에서 데이터로 취급됩니다.
pub fn load_candles_csv(path: impl AsRef<Path>) -> Result<Vec<Candle>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let mut candles = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // 헤더 건너뛰기
        if line_no == 0 && line.contains("open_time") {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();

        let open_time = parts[0]
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .with_context(|| {
                format!("Invalid timestamp at line {}: {}", line_no + 1, parts[0])
            })?;

        let candle = if parts.len() == 6 {
            Candle::new(
                open_time,
                parse_cell(parts[1], line_no),
                parse_cell(parts[2], line_no),
                parse_cell(parts[3], line_no),
                parse_cell(parts[4], line_no),
                parse_cell(parts[5], line_no),
            )
        } else if parts.len() == 2 {
            let close = parse_cell(parts[1], line_no);
            Candle::new(open_time, close, close, close, close, 0.0)
        } else {
            bail!(
                "Line {}: expected 2 or 6 columns, got {}",
                line_no + 1,
                parts.len()
            );
        };

        candles.push(candle);
    }

    info!("Loaded {} candles from {}", candles.len(), path.display());

    Ok(candles)
}

fn parse_cell(cell: &str, line_no: usize) -> f64 {
    cell.trim().parse().unwrap_or_else(|_| {
        warn!(line = line_no + 1, cell, "Unparseable price cell, keeping NaN");
        f64::NAN
    })
}

/// CSV 입력으로 백테스트 전체 파이프라인을 실행합니다.
pub fn run_backtest(input: impl AsRef<Path>, config: &SignalConfig) -> Result<BacktestSummary> {
    let candles = load_candles_csv(input)?;
    let column = closes(&candles);

    let frame = generate_signals(&column, config)?;
    let report = simulate(&column, &frame.signal)?;

    let long_rows = frame.signal.iter().filter(|&&s| s == 1).count();
    let short_rows = frame.signal.iter().filter(|&&s| s == -1).count();

    info!(
        rows = report.len(),
        long_rows,
        short_rows,
        final_cumulative_return = report.final_cumulative_return(),
        "Backtest completed"
    );

    Ok(BacktestSummary {
        rows: report.len(),
        long_rows,
        short_rows,
        nonfinite_rows: report.nonfinite_rows,
        final_cumulative_return: report.final_cumulative_return(),
    })
}
