//! 구성종목 테이블 동기화 모듈.

use crate::{CollectionStats, CollectorConfig, Result};
use movers_data::{
    NiftyIndicesSource, NseCsvConfig, NseCsvSource, SymbolAcquirer, WikipediaSource,
};
use std::path::Path;
use std::time::Instant;

/// 설정으로 기본 fallback 체인 구성 (NSE CSV → niftyindices → Wikipedia)
pub fn build_acquirer(config: &CollectorConfig) -> Result<SymbolAcquirer> {
    let profile = &config.http.profile;
    let sync = &config.symbol_sync;

    let nse = NseCsvSource::new(
        profile,
        NseCsvConfig {
            home_url: sync.nse_home_url.clone(),
            csv_url: sync.nse_csv_url.clone(),
            warmup_delay: sync.warmup_delay(),
            warmup_timeout: sync.warmup_timeout(),
            timeout: config.http.timeout(),
        },
    )?;
    let niftyindices =
        NiftyIndicesSource::new(profile, sync.niftyindices_url.clone(), config.http.timeout())?;
    let wikipedia =
        WikipediaSource::new(profile, sync.wikipedia_url.clone(), config.http.timeout())?;

    Ok(SymbolAcquirer::default()
        .with_source(nse)
        .with_source(niftyindices)
        .with_source(wikipedia))
}

/// 구성종목 테이블 동기화.
///
/// 모든 소스가 실패하면 파일을 쓰지 않고 `AllSourcesExhausted`를 반환한다.
pub async fn sync_symbols(config: &CollectorConfig, output: &Path) -> Result<CollectionStats> {
    let acquirer = build_acquirer(config)?;
    sync_with(&acquirer, output).await
}

/// 주어진 체인으로 동기화 실행
pub async fn sync_with(acquirer: &SymbolAcquirer, output: &Path) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(sources = ?acquirer.source_names(), "구성종목 동기화 시작");

    let acquired = match acquirer.acquire().await {
        Ok(acquired) => acquired,
        Err(e) => {
            eprintln!("Failed to download the Nifty 50 constituent list from every source.");
            eprintln!(
                "Download it manually and save it as {} (it needs a 'Symbol' column).",
                output.display()
            );
            return Err(e.into());
        }
    };

    stats.total = acquired.failed_sources + 1;
    stats.errors = acquired.failed_sources;
    stats.success = 1;

    let table = acquired.table.normalize();
    let rows = table.save(output)?;

    tracing::info!(
        source = acquired.source,
        rows,
        path = %output.display(),
        "구성종목 테이블 저장 완료"
    );
    println!("Saved {} rows to {}", rows, output.display());

    stats.elapsed = start.elapsed();
    Ok(stats)
}
