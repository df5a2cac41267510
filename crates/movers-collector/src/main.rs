//! Nifty 50 movers CLI.

use clap::{Parser, Subcommand};
use movers_collector::modules::{self, ReportFormat};
use movers_collector::{CollectorConfig, CollectorError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "movers")]
#[command(about = "Nifty 50 constituent sync and intraday movers report", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 구성종목 테이블 다운로드 (NSE → niftyindices → Wikipedia)
    SyncSymbols {
        /// 저장 경로 (기본: MOVERS_SYMBOLS_CSV)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// 당일 상승/하락 상위 종목 리포트
    Analyze {
        /// 구성종목 테이블 경로 (기본: MOVERS_SYMBOLS_CSV)
        #[arg(long)]
        input: Option<PathBuf>,

        /// 순위 길이
        #[arg(long)]
        top: Option<usize>,

        /// 동시 조회 수
        #[arg(long)]
        workers: Option<usize>,

        /// 출력 형식
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// 진행률 표시줄 숨김
        #[arg(long)]
        quiet: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("movers={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "실행 실패");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(command: Commands) -> Result<(), CollectorError> {
    let mut config = CollectorConfig::from_env()?;
    tracing::debug!(symbols_csv = %config.symbols_csv.display(), "설정 로드 완료");

    match command {
        Commands::SyncSymbols { output } => {
            let output = output.unwrap_or_else(|| config.symbols_csv.clone());
            let stats = modules::sync_symbols(&config, &output).await?;
            stats.log_summary("구성종목 동기화");
        }
        Commands::Analyze {
            input,
            top,
            workers,
            format,
            quiet,
        } => {
            if let Some(top) = top {
                config.snapshot_collect.top_n = top;
            }
            if let Some(workers) = workers {
                config.snapshot_collect.workers = workers;
            }
            config.snapshot_collect.show_progress = !quiet;
            config.validate()?;

            let input = input.unwrap_or_else(|| config.symbols_csv.clone());
            let mut stdout = std::io::stdout().lock();
            let stats = modules::analyze(&config, &input, format, &mut stdout).await?;
            stats.log_summary("스냅샷 수집");
        }
    }

    Ok(())
}
