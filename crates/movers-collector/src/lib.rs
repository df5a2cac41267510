//! Nifty 50 구성종목 동기화와 당일 상승/하락 리포트.
//!
//! 이 crate는 다음을 제공합니다:
//! - 구성종목 테이블 동기화 (NSE CSV → niftyindices → Wikipedia)
//! - 종목별 당일 스냅샷 병렬 수집
//! - 상승/하락 상위 종목 리포트 (text, JSON)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
