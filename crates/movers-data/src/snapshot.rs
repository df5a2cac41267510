//! 당일 스냅샷 (시가 대비 현재가 등락률).

use crate::error::Result;
use crate::provider::{IntradayBar, PriceSource};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 등락률 반올림 자릿수
pub const PCT_DECIMALS: i32 = 4;

/// 종목 하나의 당일 스냅샷.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// 종목 코드 (테이블 원본 그대로, 거래소 접미사 없음)
    pub symbol: String,
    /// 종목명 (없으면 빈 문자열)
    pub company: String,
    /// 첫 분봉 시가
    pub open: f64,
    /// 마지막 분봉 종가
    pub current: f64,
    /// 등락률 (%), 소수점 4자리
    pub pct_change: f64,
    /// 마지막 분봉 거래량
    pub volume: u64,
    /// 마지막 분봉 시각
    pub as_of: Option<DateTime<Utc>>,
}

/// 소수점 `places`자리 반올림
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// 시가 대비 등락률 (%).
///
/// 시가가 0이면 0.0을 반환한다.
pub fn pct_change(open: f64, current: f64) -> f64 {
    if open == 0.0 {
        return 0.0;
    }
    round_to((current - open) / open * 100.0, PCT_DECIMALS)
}

/// 시세 소스용 티커. 접미사가 이미 붙어 있으면 그대로 둔다.
///
/// "INFY" + ".NS" -> "INFY.NS"
pub fn exchange_ticker(symbol: &str, suffix: &str) -> String {
    if symbol.ends_with(suffix) {
        symbol.to_string()
    } else {
        format!("{}{}", symbol, suffix)
    }
}

impl Snapshot {
    /// 분봉 목록에서 스냅샷 생성. 분봉이 없으면 `None`.
    pub fn from_bars(
        symbol: impl Into<String>,
        company: impl Into<String>,
        mut bars: Vec<IntradayBar>,
    ) -> Option<Self> {
        bars.sort_by_key(|bar| bar.timestamp);

        let first = bars.first()?;
        let last = bars.last()?;

        let volume = if last.volume.is_nan() {
            0
        } else {
            last.volume as u64
        };

        Some(Self {
            symbol: symbol.into(),
            company: company.into(),
            open: first.open,
            current: last.close,
            pct_change: pct_change(first.open, last.close),
            volume,
            as_of: DateTime::from_timestamp(last.timestamp, 0),
        })
    }
}

/// 종목 하나의 스냅샷 조회.
///
/// 데이터가 없으면 `Ok(None)`. 오류 처리는 호출자 몫이다.
pub async fn fetch_snapshot(
    source: &dyn PriceSource,
    symbol: &str,
    company: &str,
    exchange_suffix: &str,
) -> Result<Option<Snapshot>> {
    let ticker = exchange_ticker(symbol, exchange_suffix);
    let bars = source.intraday_bars(&ticker).await?;
    Ok(Snapshot::from_bars(symbol, company, bars))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, open: f64, close: f64, volume: f64) -> IntradayBar {
        IntradayBar {
            timestamp,
            open,
            close,
            volume,
        }
    }

    #[test]
    fn test_pct_change_rounding() {
        assert_eq!(pct_change(100.0, 110.0), 10.0);
        assert_eq!(pct_change(50.0, 45.0), -10.0);
        assert_eq!(pct_change(3.0, 4.0), 33.3333);
        assert_eq!(pct_change(7.0, 6.0), -14.2857);
    }

    #[test]
    fn test_pct_change_zero_open() {
        let pct = pct_change(0.0, 10.0);
        assert_eq!(pct, 0.0);
        assert!(pct.is_finite());
    }

    #[test]
    fn test_exchange_ticker() {
        assert_eq!(exchange_ticker("INFY", ".NS"), "INFY.NS");
        assert_eq!(exchange_ticker("INFY.NS", ".NS"), "INFY.NS");
        assert_eq!(exchange_ticker("M&M", ".NS"), "M&M.NS");
    }

    #[test]
    fn test_from_bars_sorts_by_time() {
        let bars = vec![
            bar(1_760_585_520, 103.0, 105.0, 900.0),
            bar(1_760_585_400, 100.0, 101.0, 1_000.0),
            bar(1_760_585_460, 101.0, 103.0, 800.0),
        ];

        let snap = Snapshot::from_bars("AAA", "Alpha", bars).unwrap();
        assert_eq!(snap.open, 100.0);
        assert_eq!(snap.current, 105.0);
        assert_eq!(snap.pct_change, 5.0);
        assert_eq!(snap.volume, 900);
        assert_eq!(snap.as_of.unwrap().timestamp(), 1_760_585_520);
    }

    #[test]
    fn test_from_bars_nan_volume_is_zero() {
        let snap = Snapshot::from_bars("AAA", "", vec![bar(1, 10.0, 11.0, f64::NAN)]).unwrap();
        assert_eq!(snap.volume, 0);
        assert_eq!(snap.company, "");
    }

    #[test]
    fn test_from_bars_empty() {
        assert!(Snapshot::from_bars("AAA", "Alpha", Vec::new()).is_none());
    }
}
