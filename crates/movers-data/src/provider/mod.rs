//! 데이터 Provider 모듈.
//!
//! 외부 소스에서 데이터를 가져오는 Provider들을 정의합니다.
//!
//! ## 종목 목록 소스 (우선순위 순)
//! - `NseCsvSource`: NSE 공식 CSV (홈페이지 warm-up으로 세션 쿠키 확보 후 다운로드)
//! - `NiftyIndicesSource`: niftyindices.com 페이지의 첫 번째 테이블
//! - `WikipediaSource`: 위키백과 `wikitable` 중 구성종목으로 보이는 테이블
//!
//! ## 시세 소스
//! - `YahooChartSource`: Yahoo Finance chart API (당일 1분봉)

pub mod html;
pub mod niftyindices;
pub mod nse;
pub mod wikipedia;
pub mod yahoo;

pub use niftyindices::NiftyIndicesSource;
pub use nse::{NseCsvConfig, NseCsvSource};
pub use wikipedia::WikipediaSource;
pub use yahoo::{IntradayBar, PriceSource, YahooChartSource};

use crate::error::{DataError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// 기본 User-Agent (데스크톱 Chrome)
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// 모든 요청에 붙는 브라우저 흉내 헤더 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserProfile {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl BrowserProfile {
    /// 기본 헤더 + 지정한 Referer
    pub fn with_referer(referer: impl Into<String>) -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            referer: referer.into(),
        }
    }

    /// reqwest 기본 헤더로 변환
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        headers.insert(ACCEPT, header_value(&self.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&self.accept_language)?);
        headers.insert(REFERER, header_value(&self.referer)?);
        Ok(headers)
    }

    /// 프로필 헤더를 기본값으로 갖는 HTTP 클라이언트 생성.
    ///
    /// `cookies`가 true면 쿠키 저장소를 켠다 (warm-up → 다운로드 세션용).
    pub fn build_client(&self, cookies: bool) -> Result<Client> {
        let client = Client::builder()
            .default_headers(self.header_map()?)
            .cookie_store(cookies)
            .build()?;
        Ok(client)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| DataError::Parse(format!("invalid header value '{}': {}", value, e)))
}

/// 페이지 본문 조회. 200이 아니면 `None`.
pub(crate) async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Option<String>> {
    let response = client.get(url).timeout(timeout).send().await?;
    let status = response.status();

    if status != reqwest::StatusCode::OK {
        tracing::info!(url, status = status.as_u16(), "페이지 조회 실패");
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}
