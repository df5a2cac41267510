//! 상승/하락 상위 종목 순위.

use crate::snapshot::Snapshot;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write as _;

/// 기본 순위 길이
pub const DEFAULT_TOP_N: usize = 5;

/// 상승률 상위(내림차순)와 하락률 상위(오름차순) 두 가지 보기.
///
/// 등락률이 같으면 종목 코드 오름차순으로 정렬한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub top_n: usize,
    pub gainers: Vec<Snapshot>,
    pub losers: Vec<Snapshot>,
}

impl Ranking {
    /// 스냅샷 목록에서 순위 생성. 등락률이 유한하지 않은 스냅샷은 제외한다.
    pub fn from_snapshots(snapshots: &[Snapshot], top_n: usize) -> Self {
        let valid: Vec<&Snapshot> = snapshots
            .iter()
            .filter(|s| s.pct_change.is_finite())
            .collect();

        let mut gainers = valid.clone();
        gainers.sort_by(|a, b| by_pct(b, a).then_with(|| a.symbol.cmp(&b.symbol)));

        let mut losers = valid;
        losers.sort_by(|a, b| by_pct(a, b).then_with(|| a.symbol.cmp(&b.symbol)));

        Self {
            top_n,
            gainers: gainers.into_iter().take(top_n).cloned().collect(),
            losers: losers.into_iter().take(top_n).cloned().collect(),
        }
    }

    /// 텍스트 리포트 (상승 먼저, 하락 다음)
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_view(&mut out, "Gainers", &self.gainers);
        self.render_view(&mut out, "Losers", &self.losers);
        out
    }

    fn render_view(&self, out: &mut String, title: &str, view: &[Snapshot]) {
        let _ = writeln!(out, "\nTop {} {}:", self.top_n, title);
        for (i, snap) in view.iter().enumerate() {
            let _ = writeln!(out, "{}", format_line(i + 1, snap));
        }
    }
}

fn by_pct(a: &Snapshot, b: &Snapshot) -> Ordering {
    a.pct_change
        .partial_cmp(&b.pct_change)
        .unwrap_or(Ordering::Equal)
}

/// `Stock {rank}: {symbol} ({company}) - {pct}% - Volume: {volume}`
pub fn format_line(rank: usize, snap: &Snapshot) -> String {
    format!(
        "Stock {}: {} ({}) - {}% - Volume: {}",
        rank,
        snap.symbol,
        snap.company,
        format_pct(snap.pct_change),
        snap.volume
    )
}

/// 등락률 표기. 정수 값도 소수점 한 자리를 남긴다.
///
/// 10.0 -> "10.0", -2.5 -> "-2.5", 1.2346 -> "1.2346"
pub fn format_pct(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
