//! 당일 스냅샷 수집 모듈.
//!
//! 종목마다 태스크를 하나씩 바로 띄우고, 세마포어로 동시에 조회하는 수를
//! `workers`개로 제한한다. 결과는 채널로 모이며 완료 순서대로 하나씩 집계한다.

use crate::config::SnapshotCollectConfig;
use crate::error::CollectorError;
use crate::{CollectionStats, Result};
use indicatif::{ProgressBar, ProgressStyle};
use movers_data::{fetch_snapshot, ConstituentTable, DataError, PriceSource, Snapshot, SymbolList};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// 수집 결과
#[derive(Debug, Clone)]
pub struct SnapshotBatch {
    /// 완료 순서대로 모인 스냅샷
    pub snapshots: Vec<Snapshot>,
    pub stats: CollectionStats,
}

/// 구성종목 테이블을 읽어 종목 목록을 만든다.
///
/// `Symbol` 컬럼이 없으면 네트워크 요청 전에 `Schema` 에러로 끝난다.
pub fn load_symbols(path: &Path) -> Result<SymbolList> {
    let table = ConstituentTable::load(path)?;

    match table.symbol_list() {
        Ok(symbols) => {
            tracing::info!(path = %path.display(), count = symbols.len(), "종목 목록 로드 완료");
            Ok(symbols)
        }
        Err(DataError::MissingColumn { column }) => Err(CollectorError::Schema {
            path: path.to_path_buf(),
            column,
        }),
        Err(e) => Err(e.into()),
    }
}

/// 종목 목록 전체의 스냅샷 수집.
///
/// 개별 종목의 실패는 해당 종목만 빠지고 배치는 계속된다. 스냅샷이 하나도
/// 없으면 `EmptyResultSet`.
pub async fn collect_snapshots(
    source: Arc<dyn PriceSource>,
    symbols: &SymbolList,
    config: &SnapshotCollectConfig,
) -> Result<SnapshotBatch> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();
    stats.total = symbols.len();

    tracing::info!(
        provider = source.provider_name(),
        symbols = symbols.len(),
        workers = config.workers,
        "스냅샷 수집 시작"
    );

    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel();

    for symbol in symbols.symbols() {
        let tx = tx.clone();
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let symbol = symbol.clone();
        let company = symbols.company_name(&symbol).to_string();
        let suffix = config.exchange_suffix.clone();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let result = fetch_snapshot(source.as_ref(), &symbol, &company, &suffix).await;
            let _ = tx.send((symbol, result));
        });
    }
    drop(tx);

    let progress = progress_bar(symbols.len(), config.show_progress);
    let mut snapshots = Vec::with_capacity(symbols.len());
    let mut received = 0usize;

    while let Some((symbol, result)) = rx.recv().await {
        received += 1;

        match result {
            Ok(Some(snapshot)) => {
                stats.success += 1;
                tracing::debug!(
                    symbol = %symbol,
                    pct_change = snapshot.pct_change,
                    "스냅샷 생성"
                );
                snapshots.push(snapshot);
            }
            Ok(None) => {
                stats.empty += 1;
                tracing::debug!(symbol = %symbol, "데이터 없음");
            }
            Err(e) => {
                stats.errors += 1;
                tracing::debug!(symbol = %symbol, error = %e, "조회 실패");
            }
        }

        progress.inc(1);
        tokio::time::sleep(config.pacing()).await;
    }

    progress.finish_and_clear();
    stats.dropped = stats.total.saturating_sub(received);
    stats.elapsed = start.elapsed();

    if snapshots.is_empty() {
        stats.log_summary("스냅샷 수집");
        return Err(CollectorError::EmptyResultSet);
    }

    Ok(SnapshotBatch { snapshots, stats })
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
