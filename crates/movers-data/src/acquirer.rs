//! 종목 목록 수집 체인.
//!
//! 우선순위 순으로 등록된 소스를 하나씩 시도하고 처음 성공한 결과를 쓴다.
//! 개별 소스의 실패(오류 또는 결과 없음)는 여기서 흡수되며, 모든 소스가
//! 실패한 경우에만 [`DataError::AllSourcesExhausted`]를 반환한다.

use crate::error::{DataError, Result};
use crate::table::ConstituentTable;

/// 구성종목 테이블을 얻는 방법 하나.
#[async_trait::async_trait]
pub trait SymbolSource: Send + Sync {
    /// 로그/통계용 이름
    fn name(&self) -> &'static str;

    /// 수집 시도. 결과가 없으면 `Ok(None)`.
    async fn fetch(&self) -> Result<Option<ConstituentTable>>;
}

/// 수집 결과
#[derive(Debug, Clone)]
pub struct Acquired {
    /// 성공한 소스 이름
    pub source: &'static str,
    /// 실패한 소스 수
    pub failed_sources: usize,
    pub table: ConstituentTable,
}

/// 순차 fallback 수집기
#[derive(Default)]
pub struct SymbolAcquirer {
    sources: Vec<Box<dyn SymbolSource>>,
}

impl SymbolAcquirer {
    pub fn new(sources: Vec<Box<dyn SymbolSource>>) -> Self {
        Self { sources }
    }

    /// 가장 낮은 우선순위로 소스 추가
    pub fn with_source(mut self, source: impl SymbolSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// 등록된 소스 이름 (우선순위 순)
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// 소스를 순서대로 시도한다. 동시에 여러 소스를 돌리지 않는다.
    pub async fn acquire(&self) -> Result<Acquired> {
        let mut attempted = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let name = source.name();
            attempted.push(name.to_string());

            match source.fetch().await {
                Ok(Some(table)) => {
                    tracing::info!(source = name, rows = table.len(), "종목 목록 수집 성공");
                    return Ok(Acquired {
                        source: name,
                        failed_sources: attempted.len() - 1,
                        table,
                    });
                }
                Ok(None) => {
                    tracing::info!(source = name, "결과 없음, 다음 소스로 진행");
                }
                Err(e) => {
                    tracing::info!(source = name, error = %e, "소스 시도 중 오류, 다음 소스로 진행");
                }
            }
        }

        Err(DataError::AllSourcesExhausted { attempted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Outcome {
        Table(&'static str),
        Empty,
        Fail,
    }

    struct StubSource {
        name: &'static str,
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn new(name: &'static str, outcome: Outcome) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    outcome,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait::async_trait]
    impl SymbolSource for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<Option<ConstituentTable>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Table(symbol) => Ok(Some(ConstituentTable::new(
                    vec!["Symbol".to_string()],
                    vec![vec![symbol.to_string()]],
                ))),
                Outcome::Empty => Ok(None),
                Outcome::Fail => Err(DataError::Parse("boom".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let (primary, primary_calls) = StubSource::new("primary", Outcome::Fail);
        let (secondary, _) = StubSource::new("secondary", Outcome::Table("INFY"));
        let (tertiary, tertiary_calls) = StubSource::new("tertiary", Outcome::Table("TCS"));

        let acquirer = SymbolAcquirer::default()
            .with_source(primary)
            .with_source(secondary)
            .with_source(tertiary);

        let acquired = acquirer.acquire().await.unwrap();
        assert_eq!(acquired.source, "secondary");
        assert_eq!(acquired.failed_sources, 1);
        assert_eq!(acquired.table.rows()[0][0], "INFY");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(tertiary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_sources_exhausted() {
        let (a, _) = StubSource::new("a", Outcome::Empty);
        let (b, _) = StubSource::new("b", Outcome::Fail);
        let acquirer = SymbolAcquirer::default().with_source(a).with_source(b);

        match acquirer.acquire().await {
            Err(DataError::AllSourcesExhausted { attempted }) => {
                assert_eq!(attempted, vec!["a", "b"]);
            }
            other => panic!("expected exhaustion, got {:?}", other.map(|a| a.source)),
        }
    }

    #[test]
    fn test_source_names_keep_priority_order() {
        let (a, _) = StubSource::new("a", Outcome::Empty);
        let (b, _) = StubSource::new("b", Outcome::Empty);
        let acquirer = SymbolAcquirer::new(vec![Box::new(a), Box::new(b)]);
        assert_eq!(acquirer.source_names(), vec!["a", "b"]);
    }
}
