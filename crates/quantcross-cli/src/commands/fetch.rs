//! 캔들 데이터 수집 명령어.
//!
//! Binance 공개 API에서 최신 캔들 한 페이지를 받아 CSV 파일로
//! 저장합니다. 요청은 한 번이며 페이지네이션이나 재시도는 없습니다.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use quantcross_core::{Candle, FetchConfig};
use quantcross_exchange::{BinanceClient, BinanceConfig};

/// 캔들을 수집해서 CSV로 저장하고 행 수를 반환합니다.
pub async fn fetch_and_save(config: &FetchConfig) -> Result<usize> {
    let client = BinanceClient::new(BinanceConfig::from(config))?;

    // 진행률 표시줄
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!(
        "Fetching {} {} klines from {}...",
        config.symbol, config.interval, config.rest_base_url
    ));

    let candles = client
        .fetch_klines(&config.symbol, &config.interval, config.limit)
        .await?;

    pb.finish_with_message(format!("Fetched {} candles", candles.len()));

    save_to_csv(&config.output, &candles)
}

/// CSV 파일로 저장
pub fn save_to_csv(output_path: &str, candles: &[Candle]) -> Result<usize> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let mut writer = BufWriter::new(file);

    // CSV 헤더 작성
    writeln!(writer, "open_time,open,high,low,close,volume")?;

    // 데이터 작성
    for candle in candles {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            candle.open_time_ms(),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume
        )?;
    }

    writer.flush()?;

    info!("Saved {} candles to {}", candles.len(), output_path);

    Ok(candles.len())
}
