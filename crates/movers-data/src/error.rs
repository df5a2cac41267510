//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패 (연결, 타임아웃, 본문 읽기)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 200이 아닌 응답
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// CSV 읽기/쓰기 오류
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 파일 입출력 오류
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 종목 테이블에 필수 컬럼이 없음
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// 모든 종목 목록 소스 실패
    #[error("All symbol sources failed: {}", attempted.join(", "))]
    AllSourcesExhausted { attempted: Vec<String> },
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
