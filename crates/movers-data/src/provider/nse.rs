//! NSE 공식 구성종목 CSV.
//!
//! NSE 아카이브는 홈페이지에서 발급한 세션 쿠키가 없으면 요청을 거부하는
//! 경우가 있어, 같은 클라이언트로 홈페이지를 먼저 조회한 뒤 잠시 기다렸다가
//! CSV를 받는다.

use super::BrowserProfile;
use crate::acquirer::SymbolSource;
use crate::error::Result;
use crate::table::ConstituentTable;
use reqwest::header::REFERER;
use reqwest::Client;
use std::time::Duration;

/// NSE CSV 소스 설정
#[derive(Debug, Clone)]
pub struct NseCsvConfig {
    /// warm-up 대상 홈페이지 (Referer로도 사용)
    pub home_url: String,
    /// 구성종목 CSV URL
    pub csv_url: String,
    /// warm-up 후 CSV 요청 전 대기 시간
    pub warmup_delay: Duration,
    /// warm-up 요청 타임아웃
    pub warmup_timeout: Duration,
    /// CSV 요청 타임아웃
    pub timeout: Duration,
}

/// NSE 공식 CSV 다운로드 소스.
pub struct NseCsvSource {
    /// 쿠키 저장소가 켜진 세션 클라이언트
    session: Client,
    config: NseCsvConfig,
}

impl NseCsvSource {
    pub fn new(profile: &BrowserProfile, config: NseCsvConfig) -> Result<Self> {
        Ok(Self {
            session: profile.build_client(true)?,
            config,
        })
    }

    /// CSV 본문을 테이블로 파싱. 파싱 실패는 `None`.
    fn parse_body(body: &str) -> Option<ConstituentTable> {
        match ConstituentTable::from_csv_str(body) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::info!(error = %e, "NSE CSV 파싱 실패");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl SymbolSource for NseCsvSource {
    fn name(&self) -> &'static str {
        "nse-csv"
    }

    async fn fetch(&self) -> Result<Option<ConstituentTable>> {
        tracing::info!(url = %self.config.csv_url, "NSE 공식 CSV 시도");

        // 세션 쿠키 확보 (응답 상태는 보지 않음)
        self.session
            .get(&self.config.home_url)
            .timeout(self.config.warmup_timeout)
            .send()
            .await?;

        tokio::time::sleep(self.config.warmup_delay).await;

        let response = self
            .session
            .get(&self.config.csv_url)
            .header(REFERER, &self.config.home_url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::info!(status = status.as_u16(), "NSE CSV 요청 실패");
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            tracing::info!("NSE CSV 응답 본문이 비어 있음");
            return Ok(None);
        }

        let table = Self::parse_body(&body);
        if let Some(table) = &table {
            tracing::info!(rows = table.len(), "NSE CSV 다운로드 성공");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(server: &mockito::ServerGuard) -> NseCsvConfig {
        NseCsvConfig {
            home_url: format!("{}/", server.url()),
            csv_url: format!("{}/content/indices/ind_nifty50list.csv", server.url()),
            warmup_delay: Duration::from_millis(1),
            warmup_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_warmup_cookie_is_sent_with_csv_request() {
        let mut server = mockito::Server::new_async().await;
        let home = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("set-cookie", "nsit=abc123; Path=/")
            .with_body("<html></html>")
            .create_async()
            .await;
        let csv = server
            .mock("GET", "/content/indices/ind_nifty50list.csv")
            .match_header("cookie", mockito::Matcher::Regex("nsit=abc123".to_string()))
            .match_header("referer", mockito::Matcher::Regex("^http".to_string()))
            .with_status(200)
            .with_body("Company Name,Industry,Symbol,Series,ISIN Code\nInfosys Ltd.,IT,INFY,EQ,INE009A01021\n")
            .create_async()
            .await;

        let cfg = config(&server);
        let source = NseCsvSource::new(&BrowserProfile::with_referer(cfg.home_url.clone()), cfg).unwrap();
        let table = source.fetch().await.unwrap().unwrap();

        home.assert_async().await;
        csv.assert_async().await;
        assert_eq!(table.len(), 1);
        assert_eq!(table.column_index("Symbol"), Some(2));
    }

    #[tokio::test]
    async fn test_non_200_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(200).create_async().await;
        server
            .mock("GET", "/content/indices/ind_nifty50list.csv")
            .with_status(401)
            .create_async()
            .await;

        let cfg = config(&server);
        let source = NseCsvSource::new(&BrowserProfile::with_referer(cfg.home_url.clone()), cfg).unwrap();
        assert!(source.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_body_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(200).create_async().await;
        server
            .mock("GET", "/content/indices/ind_nifty50list.csv")
            .with_status(200)
            .with_body("  \n ")
            .create_async()
            .await;

        let cfg = config(&server);
        let source = NseCsvSource::new(&BrowserProfile::with_referer(cfg.home_url.clone()), cfg).unwrap();
        assert!(source.fetch().await.unwrap().is_none());
    }
}
