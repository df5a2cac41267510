//! Yahoo Finance chart API 기반 당일 분봉 조회.
//!
//! `range=1d&interval=1m&includePrePost=false`로 요청하며 `events`는
//! 지정하지 않으므로 배당/분할 정보는 포함되지 않는다.

use super::BrowserProfile;
use crate::error::{DataError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// 1분봉 하나. 거래량이 비어 있으면 NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntradayBar {
    /// UNIX 타임스탬프 (초)
    pub timestamp: i64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

/// 종목별 당일 분봉을 제공하는 시세 소스.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// 당일 정규장 1분봉 조회. 데이터가 없으면 빈 벡터.
    async fn intraday_bars(&self, ticker: &str) -> Result<Vec<IntradayBar>>;
}

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance chart API 클라이언트
pub struct YahooChartSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl YahooChartSource {
    /// `base_url` 예: `https://query1.finance.yahoo.com/v8/finance/chart`
    pub fn new(profile: &BrowserProfile, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: profile.build_client(false)?,
            base_url: base_url.into(),
            timeout,
        })
    }

    fn url(&self, ticker: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ticker)
    }
}

#[async_trait::async_trait]
impl PriceSource for YahooChartSource {
    fn provider_name(&self) -> &'static str {
        "yahoo_chart"
    }

    async fn intraday_bars(&self, ticker: &str) -> Result<Vec<IntradayBar>> {
        let url = self.url(ticker);
        tracing::debug!(ticker, url = %url, "Yahoo 분봉 조회");

        let response = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1m"), ("includePrePost", "false")])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_chart(ticker, &body)
    }
}

/// chart API 응답 본문을 분봉 목록으로 변환.
///
/// 시가/종가가 비어 있는 봉은 건너뛰고, 비어 있는 거래량은 NaN으로 둔다.
pub fn parse_chart(ticker: &str, body: &str) -> Result<Vec<IntradayBar>> {
    let response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(DataError::Parse(format!(
            "Yahoo Finance error for {}: {} - {}",
            ticker, error.code, error.description
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let opens = quote.open.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let bars = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let open = opens.get(i).copied().flatten()?;
            let close = closes.get(i).copied().flatten()?;
            let volume = volumes.get(i).copied().flatten().unwrap_or(f64::NAN);
            Some(IntradayBar {
                timestamp,
                open,
                close,
                volume,
            })
        })
        .collect();

    Ok(bars)
}
