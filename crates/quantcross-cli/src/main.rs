//! MA 크로스오버 파이프라인 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # BTCUSDT 1시간봉 1000개 수집 (기본값)
//! quantcross fetch
//!
//! # 심볼/간격/개수 지정 수집
//! quantcross fetch -s ETHUSDT -i 4h -l 500 -o data/ethusdt_4h.csv
//!
//! # 수집된 CSV로 백테스트 (5/20 기본 윈도우)
//! quantcross backtest
//!
//! # 입력 파일과 윈도우 지정
//! quantcross backtest -i data/ethusdt_4h.csv -s 10 -l 50
//! ```

use clap::{Parser, Subcommand};
use tracing::{error, info};

mod commands;

use quantcross_core::{init_logging, AppConfig, LogConfig};

#[derive(Parser)]
#[command(name = "quantcross")]
#[command(about = "MA crossover pipeline CLI - 수집/신호/백테스트", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 최신 캔들 한 페이지를 수집해서 CSV로 저장
    Fetch {
        /// 거래 심볼 (예: BTCUSDT, ETHUSDT, 기본: 설정 파일)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 캔들 간격 (예: 1m, 1h, 4h, 1d)
        #[arg(short, long)]
        interval: Option<String>,

        /// 캔들 개수 (1..=1000)
        #[arg(short, long)]
        limit: Option<usize>,

        /// 출력 CSV 경로
        #[arg(short, long)]
        output: Option<String>,

        /// 설정 파일 경로
        #[arg(short, long, default_value = "config/default.toml")]
        config: String,
    },

    /// CSV 파일로 MA 크로스오버 백테스트 실행
    Backtest {
        /// 입력 CSV 경로 (기본: fetch 출력 경로)
        #[arg(short, long)]
        input: Option<String>,

        /// 단기 이동평균 윈도우
        #[arg(short, long)]
        short_window: Option<usize>,

        /// 장기 이동평균 윈도우
        #[arg(short, long)]
        long_window: Option<usize>,

        /// 설정 파일 경로
        #[arg(short, long, default_value = "config/default.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbol,
            interval,
            limit,
            output,
            config,
        } => {
            let app_config = AppConfig::load(&config)?;
            init_logging(LogConfig::from(&app_config.logging))?;

            // 플래그 > 설정 파일 > 기본값
            let mut fetch_config = app_config.fetch;
            if let Some(s) = symbol {
                fetch_config.symbol = s.to_uppercase();
            }
            if let Some(i) = interval {
                fetch_config.interval = i;
            }
            if let Some(l) = limit {
                fetch_config.limit = l;
            }
            if let Some(o) = output {
                fetch_config.output = o;
            }

            println!("\n📥 캔들 데이터를 수집합니다...");
            println!("심볼: {}", fetch_config.symbol);
            println!("간격: {}", fetch_config.interval);
            println!("개수: {}", fetch_config.limit);

            match commands::fetch::fetch_and_save(&fetch_config).await {
                Ok(count) => {
                    info!("✅ Successfully fetched {} candles", count);
                    println!("\n✅ 데이터 수집 완료: {} 캔들", count);
                    println!("저장 위치: {}", fetch_config.output);
                }
                Err(e) => {
                    error!("Fetch failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Backtest {
            input,
            short_window,
            long_window,
            config,
        } => {
            let app_config = AppConfig::load(&config)?;
            init_logging(LogConfig::from(&app_config.logging))?;

            let input_path = input.unwrap_or_else(|| app_config.fetch.output.clone());

            let mut signal_config = app_config.signal;
            if let Some(w) = short_window {
                signal_config.short_window = w;
            }
            if let Some(w) = long_window {
                signal_config.long_window = w;
            }

            println!("\n📊 백테스트 실행 중...");
            println!("입력 파일: {}", input_path);
            println!(
                "윈도우: 단기 {} / 장기 {}",
                signal_config.short_window, signal_config.long_window
            );

            match commands::backtest::run_backtest(&input_path, &signal_config) {
                Ok(summary) => {
                    info!("✅ Backtest completed successfully");
                    println!("\n✅ 백테스트 완료: {} 행", summary.rows);
                    println!(
                        "롱 신호: {} 행 / 숏 신호: {} 행",
                        summary.long_rows, summary.short_rows
                    );
                    if summary.nonfinite_rows > 0 {
                        println!("⚠️  NaN/inf 수익률 행: {}", summary.nonfinite_rows);
                    }
                    println!("cumulative_return: {}", summary.final_cumulative_return);
                }
                Err(e) => {
                    error!("Backtest failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
