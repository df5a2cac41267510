//! 에러 타입 정의.

use movers_data::DataError;
use std::fmt;
use std::path::PathBuf;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 설정 에러
    Config(String),
    /// 데이터 소스 에러 (CSV 읽기, HTTP 등)
    DataSource(DataError),
    /// 종목 테이블에 필수 컬럼이 없음
    Schema { path: PathBuf, column: String },
    /// 모든 종목 목록 소스 실패
    AllSourcesExhausted { attempted: Vec<String> },
    /// 유효한 스냅샷이 하나도 없음
    EmptyResultSet,
    /// 파일/표준출력 입출력 에러
    Io(std::io::Error),
}

impl CollectorError {
    /// 프로세스 종료 코드.
    ///
    /// | 코드 | 의미 |
    /// |------|------|
    /// | 1 | 기타 실패 |
    /// | 2 | 모든 종목 목록 소스 실패 |
    /// | 3 | 종목 테이블 스키마 오류 |
    /// | 4 | 결과 없음 |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::AllSourcesExhausted { .. } => 2,
            Self::Schema { .. } => 3,
            Self::EmptyResultSet => 4,
            Self::Config(_) | Self::DataSource(_) | Self::Io(_) => 1,
        }
    }
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::DataSource(e) => write!(f, "Data source error: {}", e),
            Self::Schema { path, column } => write!(
                f,
                "Schema error: {} has no '{}' column",
                path.display(),
                column
            ),
            Self::AllSourcesExhausted { attempted } => write!(
                f,
                "All symbol sources failed ({})",
                attempted.join(", ")
            ),
            Self::EmptyResultSet => write!(f, "No valid data fetched for any symbol"),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DataSource(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::AllSourcesExhausted { attempted } => Self::AllSourcesExhausted { attempted },
            other => Self::DataSource(other),
        }
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
