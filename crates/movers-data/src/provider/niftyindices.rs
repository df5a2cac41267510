//! niftyindices.com 지수 페이지 크롤러.

use super::{fetch_page, html, BrowserProfile};
use crate::acquirer::SymbolSource;
use crate::error::Result;
use crate::table::ConstituentTable;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// 지수 페이지의 첫 번째 테이블을 구성종목으로 사용하는 소스.
pub struct NiftyIndicesSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl NiftyIndicesSource {
    pub fn new(profile: &BrowserProfile, url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: profile.build_client(false)?,
            url: url.into(),
            timeout,
        })
    }

    /// 페이지 HTML에서 첫 번째 테이블 파싱
    pub fn parse_page(body: &str) -> Result<Option<ConstituentTable>> {
        let document = Html::parse_document(body);

        let Some(table) = html::first_table(&document)? else {
            tracing::info!("NiftyIndices 페이지에 테이블 없음");
            return Ok(None);
        };

        let table = html::table_from_element(table)?;
        if table.is_none() {
            tracing::info!("NiftyIndices 테이블에 데이터 행 없음");
        }
        Ok(table)
    }
}

#[async_trait::async_trait]
impl SymbolSource for NiftyIndicesSource {
    fn name(&self) -> &'static str {
        "niftyindices"
    }

    async fn fetch(&self) -> Result<Option<ConstituentTable>> {
        tracing::info!(url = %self.url, "NiftyIndices 페이지 시도");

        let Some(body) = fetch_page(&self.client, &self.url, self.timeout).await? else {
            return Ok(None);
        };

        let table = Self::parse_page(&body)?;
        if let Some(table) = &table {
            tracing::info!(rows = table.len(), "NiftyIndices 구성종목 파싱 완료");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_table() {
        let body = r#"
            <table class="constituents">
              <thead><tr><th>Company Name</th><th>Symbol</th><th>Weightage</th></tr></thead>
              <tbody>
                <tr><td>HDFC Bank Ltd.</td><td>HDFCBANK</td><td>13.2</td></tr>
                <tr><td>ICICI Bank Ltd.</td><td>ICICIBANK</td><td>9.1</td></tr>
              </tbody>
            </table>
        "#;

        let table = NiftyIndicesSource::parse_page(body).unwrap().unwrap();
        assert_eq!(table.headers(), &["Company Name", "Symbol", "Weightage"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.symbol_list().unwrap().company_name("ICICIBANK"), "ICICI Bank Ltd.");
    }

    #[test]
    fn test_parse_page_without_table() {
        assert!(NiftyIndicesSource::parse_page("<div>loading...</div>")
            .unwrap()
            .is_none());
    }
}
