//! 수집/분석 파이프라인 모듈.

pub mod report;
pub mod snapshot_collect;
pub mod symbol_sync;

pub use report::{analyze, analyze_with, render_report, ReportFormat};
pub use snapshot_collect::{collect_snapshots, load_symbols, SnapshotBatch};
pub use symbol_sync::{build_acquirer, sync_symbols, sync_with};
