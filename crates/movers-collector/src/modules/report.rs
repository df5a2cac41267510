//! 상승/하락 리포트 모듈.

use super::snapshot_collect::{collect_snapshots, load_symbols};
use crate::{CollectionStats, CollectorConfig, CollectorError, Result};
use movers_data::{PriceSource, Ranking, YahooChartSource};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// 리포트 출력 형식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// `Stock N: ...` 목록
    #[default]
    Text,
    /// gainers/losers 배열을 담은 JSON
    Json,
}

/// 순위를 지정한 형식의 문자열로 변환
pub fn render_report(ranking: &Ranking, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(ranking.render()),
        ReportFormat::Json => serde_json::to_string_pretty(ranking)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| CollectorError::DataSource(e.into())),
    }
}

/// 분석 파이프라인: 테이블 로드 → 스냅샷 수집 → 순위 → 출력.
pub async fn analyze<W: Write>(
    config: &CollectorConfig,
    input: &Path,
    format: ReportFormat,
    out: &mut W,
) -> Result<CollectionStats> {
    let symbols = load_symbols(input)?;

    let source = YahooChartSource::new(
        &config.http.profile,
        config.snapshot_collect.chart_base_url.clone(),
        config.http.timeout(),
    )?;

    analyze_with(Arc::new(source), config, &symbols, format, out).await
}

/// 주어진 시세 소스로 분석 실행
pub async fn analyze_with<W: Write>(
    source: Arc<dyn PriceSource>,
    config: &CollectorConfig,
    symbols: &movers_data::SymbolList,
    format: ReportFormat,
    out: &mut W,
) -> Result<CollectionStats> {
    let batch = collect_snapshots(source, symbols, &config.snapshot_collect).await?;

    let ranking = Ranking::from_snapshots(&batch.snapshots, config.snapshot_collect.top_n);
    out.write_all(render_report(&ranking, format)?.as_bytes())?;
    out.flush()?;

    Ok(batch.stats)
}
