//! 지수 구성종목 수집 및 당일 등락 분석.
//!
//! 이 crate는 다음을 제공합니다:
//! - 구성종목 테이블 (CSV 저장/로드, 종목 코드 추출)
//! - 종목 목록 소스와 순차 fallback 수집기
//! - Yahoo Finance 당일 분봉 조회
//! - 스냅샷(시가 대비 등락률) 계산과 상승/하락 순위

pub mod acquirer;
pub mod error;
pub mod provider;
pub mod ranking;
pub mod snapshot;
pub mod table;

pub use acquirer::{Acquired, SymbolAcquirer, SymbolSource};
pub use error::{DataError, Result};
pub use provider::{
    BrowserProfile, IntradayBar, NiftyIndicesSource, NseCsvConfig, NseCsvSource, PriceSource,
    WikipediaSource, YahooChartSource,
};
pub use ranking::Ranking;
pub use snapshot::{exchange_ticker, fetch_snapshot, pct_change, Snapshot};
pub use table::{ConstituentTable, SymbolList};
