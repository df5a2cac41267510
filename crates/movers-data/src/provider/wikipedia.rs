//! 위키백과 지수 문서 크롤러 (최후 수단).
//!
//! 문서에는 `wikitable` 클래스 테이블이 여러 개 있으므로 휴리스틱으로
//! 구성종목 테이블을 고른다: 텍스트에 "company" 또는 "symbol"이 있거나
//! (대소문자 무시) 행이 50개 이상인 첫 번째 테이블.

use super::{fetch_page, html, BrowserProfile};
use crate::acquirer::SymbolSource;
use crate::error::Result;
use crate::table::ConstituentTable;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::time::Duration;

/// 구성종목 테이블 표식 클래스
pub const MARKER_CLASS: &str = "wikitable";

/// 키워드 없이도 구성종목으로 볼 최소 행 수
pub const MIN_ROWS: usize = 50;

pub struct WikipediaSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WikipediaSource {
    pub fn new(profile: &BrowserProfile, url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: profile.build_client(false)?,
            url: url.into(),
            timeout,
        })
    }

    /// 구성종목 테이블로 보이는지 판단
    fn looks_like_constituents(table: ElementRef<'_>, tr: &scraper::Selector) -> bool {
        let text = table.text().collect::<String>().to_lowercase();
        text.contains("company") || text.contains("symbol") || table.select(tr).count() >= MIN_ROWS
    }

    /// 문서 HTML에서 구성종목 테이블 파싱
    pub fn parse_page(body: &str) -> Result<Option<ConstituentTable>> {
        let document = Html::parse_document(body);
        let tables = html::selector(&format!("table.{}", MARKER_CLASS))?;
        let tr = html::selector("tr")?;

        let candidate = document
            .select(&tables)
            .find(|table| Self::looks_like_constituents(*table, &tr));

        let Some(table) = candidate else {
            tracing::info!("위키백과 문서에 적합한 테이블 없음");
            return Ok(None);
        };

        let table = html::table_from_element(table)?;
        if table.is_none() {
            tracing::info!("위키백과 테이블에 데이터 행 없음");
        }
        Ok(table)
    }
}

#[async_trait::async_trait]
impl SymbolSource for WikipediaSource {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn fetch(&self) -> Result<Option<ConstituentTable>> {
        tracing::info!(url = %self.url, "위키백과 fallback 시도");

        let Some(body) = fetch_page(&self.client, &self.url, self.timeout).await? else {
            return Ok(None);
        };

        let table = Self::parse_page(&body)?;
        if let Some(table) = &table {
            tracing::info!(rows = table.len(), "위키백과 구성종목 파싱 완료");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_tables_without_marker_or_keywords() {
        let body = r#"
            <table><tr><th>Company</th></tr><tr><td>not a wikitable</td></tr></table>
            <table class="wikitable"><tr><th>Year</th><th>Close</th></tr><tr><td>2020</td><td>13981</td></tr></table>
            <table class="wikitable sortable">
              <tr><th>Company name</th><th>Symbol</th><th>Sector</th></tr>
              <tr><td>Adani Ports</td><td>ADANIPORTS</td><td>Infrastructure</td></tr>
              <tr><td>Asian Paints</td><td>ASIANPAINT</td><td>Consumer Durables</td></tr>
            </table>
        "#;

        let table = WikipediaSource::parse_page(body).unwrap().unwrap();
        assert_eq!(table.headers(), &["Company name", "Symbol", "Sector"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_large_table_qualifies_without_keywords() {
        let mut body = String::from(r#"<table class="wikitable">"#);
        for i in 0..MIN_ROWS {
            body.push_str(&format!("<tr><td>T{i}</td><td>{i}</td></tr>"));
        }
        body.push_str("</table>");

        let table = WikipediaSource::parse_page(&body).unwrap().unwrap();
        assert_eq!(table.len(), MIN_ROWS);
        assert_eq!(table.headers(), &["0", "1"]);
    }

    #[test]
    fn test_no_qualifying_table() {
        let body = r#"<table class="wikitable"><tr><th>Year</th></tr><tr><td>2021</td></tr></table>"#;
        assert!(WikipediaSource::parse_page(body).unwrap().is_none());
    }
}
