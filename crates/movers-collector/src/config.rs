//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use movers_data::ranking::DEFAULT_TOP_N;
use movers_data::BrowserProfile;
use std::path::PathBuf;
use std::time::Duration;

/// 구성종목 테이블 기본 경로
pub const DEFAULT_SYMBOLS_CSV: &str = "nifty50_today.csv";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 구성종목 테이블 경로 (sync가 쓰고 analyze가 읽음)
    pub symbols_csv: PathBuf,
    /// HTTP 공통 설정
    pub http: HttpConfig,
    /// 종목 목록 수집 설정
    pub symbol_sync: SymbolSyncConfig,
    /// 스냅샷 수집 설정
    pub snapshot_collect: SnapshotCollectConfig,
}

/// HTTP 공통 설정
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// 모든 요청에 붙는 헤더
    pub profile: BrowserProfile,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

/// 종목 목록 수집 설정
#[derive(Debug, Clone)]
pub struct SymbolSyncConfig {
    /// NSE 홈페이지 (warm-up, Referer)
    pub nse_home_url: String,
    /// NSE 구성종목 CSV
    pub nse_csv_url: String,
    /// niftyindices.com 지수 페이지
    pub niftyindices_url: String,
    /// 위키백과 지수 문서
    pub wikipedia_url: String,
    /// warm-up 후 대기 (밀리초)
    pub warmup_delay_ms: u64,
    /// warm-up 요청 타임아웃 (초)
    pub warmup_timeout_secs: u64,
}

/// 스냅샷 수집 설정
#[derive(Debug, Clone)]
pub struct SnapshotCollectConfig {
    /// Yahoo chart API 기본 URL
    pub chart_base_url: String,
    /// 시세 소스 티커 접미사
    pub exchange_suffix: String,
    /// 동시 조회 수
    pub workers: usize,
    /// 결과 하나를 받을 때마다 쉬는 시간 (밀리초)
    pub pacing_ms: u64,
    /// 순위 길이
    pub top_n: usize,
    /// 진행률 표시줄 출력 여부
    pub show_progress: bool,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드 (`.env` 파일 포함)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let nse_home_url = env_string(&lookup, "MOVERS_NSE_HOME_URL", "https://www.nseindia.com");

        let config = Self {
            symbols_csv: PathBuf::from(env_string(&lookup, "MOVERS_SYMBOLS_CSV", DEFAULT_SYMBOLS_CSV)),
            http: HttpConfig {
                profile: BrowserProfile::with_referer(nse_home_url.clone()),
                timeout_secs: env_parse(&lookup, "MOVERS_HTTP_TIMEOUT_SECS", 15),
            },
            symbol_sync: SymbolSyncConfig {
                nse_home_url,
                nse_csv_url: env_string(
                    &lookup,
                    "MOVERS_NSE_CSV_URL",
                    "https://nsearchives.nseindia.com/content/indices/ind_nifty50list.csv",
                ),
                niftyindices_url: env_string(
                    &lookup,
                    "MOVERS_NIFTYINDICES_URL",
                    "https://www.niftyindices.com/indices/equity/broad-based-indices/nifty--50",
                ),
                wikipedia_url: env_string(
                    &lookup,
                    "MOVERS_WIKIPEDIA_URL",
                    "https://en.wikipedia.org/wiki/NIFTY_50",
                ),
                warmup_delay_ms: env_parse(&lookup, "MOVERS_WARMUP_DELAY_MS", 500),
                warmup_timeout_secs: env_parse(&lookup, "MOVERS_WARMUP_TIMEOUT_SECS", 10),
            },
            snapshot_collect: SnapshotCollectConfig {
                chart_base_url: env_string(
                    &lookup,
                    "MOVERS_CHART_BASE_URL",
                    "https://query1.finance.yahoo.com/v8/finance/chart",
                ),
                exchange_suffix: env_string(&lookup, "MOVERS_EXCHANGE_SUFFIX", ".NS"),
                workers: env_parse(&lookup, "MOVERS_WORKERS", 8),
                pacing_ms: env_parse(&lookup, "MOVERS_PACING_MS", 50),
                top_n: env_parse(&lookup, "MOVERS_TOP_N", DEFAULT_TOP_N),
                show_progress: true,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_collect.workers == 0 {
            return Err(CollectorError::Config(
                "MOVERS_WORKERS는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.snapshot_collect.top_n == 0 {
            return Err(CollectorError::Config(
                "MOVERS_TOP_N은 1 이상이어야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

impl HttpConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SymbolSyncConfig {
    pub fn warmup_delay(&self) -> Duration {
        Duration::from_millis(self.warmup_delay_ms)
    }

    pub fn warmup_timeout(&self) -> Duration {
        Duration::from_secs(self.warmup_timeout_secs)
    }
}

impl SnapshotCollectConfig {
    /// 결과 처리 간 딜레이를 Duration으로 반환
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// 문자열 값 조회 (비어 있으면 기본값)
fn env_string<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 값을 파싱 (실패 시 기본값 사용)
fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.symbols_csv, PathBuf::from(DEFAULT_SYMBOLS_CSV));
        assert_eq!(config.snapshot_collect.workers, 8);
        assert_eq!(config.snapshot_collect.top_n, DEFAULT_TOP_N);
        assert_eq!(config.snapshot_collect.exchange_suffix, ".NS");
        assert_eq!(config.snapshot_collect.pacing(), Duration::from_millis(50));
        assert_eq!(config.symbol_sync.warmup_delay(), Duration::from_millis(500));
        assert_eq!(config.symbol_sync.warmup_timeout(), Duration::from_secs(10));
        assert_eq!(config.http.timeout(), Duration::from_secs(15));
        assert_eq!(config.http.profile.referer, "https://www.nseindia.com");
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = CollectorConfig::from_lookup(lookup(&[
            ("MOVERS_WORKERS", "3"),
            ("MOVERS_PACING_MS", "not-a-number"),
            ("MOVERS_NSE_HOME_URL", "http://localhost:9000"),
            ("MOVERS_SYMBOLS_CSV", "  "),
        ]))
        .unwrap();

        assert_eq!(config.snapshot_collect.workers, 3);
        assert_eq!(config.snapshot_collect.pacing_ms, 50);
        assert_eq!(config.symbol_sync.nse_home_url, "http://localhost:9000");
        assert_eq!(config.http.profile.referer, "http://localhost:9000");
        assert_eq!(config.symbols_csv, PathBuf::from(DEFAULT_SYMBOLS_CSV));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let res = CollectorConfig::from_lookup(lookup(&[("MOVERS_WORKERS", "0")]));
        assert!(matches!(res, Err(CollectorError::Config(_))));
    }
}
