//! 지수 구성종목 테이블.
//!
//! 종목 목록 수집 결과를 헤더가 있는 CSV 파일로 저장하고, 분석 단계에서
//! 다시 읽어 종목 코드 목록과 종목명 매핑을 만든다.
//! 수집 소스마다 컬럼 구성이 다르므로 컬럼 집합은 고정하지 않는다.

use crate::error::{DataError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// 종목 코드 컬럼명
pub const SYMBOL_COLUMN: &str = "Symbol";

/// 종목명 컬럼명
pub const COMPANY_COLUMN: &str = "Company Name";

/// 행 단위 구성종목 테이블 (헤더 + 문자열 셀).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstituentTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ConstituentTable {
    /// 헤더와 행으로 생성.
    ///
    /// 헤더보다 짧은 행은 빈 셀로 채운다.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// HTML 테이블에서 추출한 헤더/행으로 생성.
    ///
    /// 첫 행의 셀 수만큼 헤더를 잘라 컬럼명으로 쓰고, 짧은 행은 빈 셀로
    /// 채운다. 헤더가 첫 행보다 적거나 첫 행보다 긴 행이 있으면 `0..n`
    /// 위치 기반 컬럼명으로 대체한다.
    pub fn from_scraped(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let fits = rows.iter().all(|row| row.len() <= width);

        if fits && headers.len() >= width {
            let mut headers = headers;
            headers.truncate(width);
            return Self::new(headers, rows);
        }

        tracing::debug!(
            headers = headers.len(),
            width,
            fits,
            "헤더로 행을 표현할 수 없어 위치 기반 컬럼명 사용"
        );

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let positional = (0..width).map(|i| i.to_string()).collect();
        Self::new(positional, rows)
    }

    /// CSV 본문 파싱. 컬럼명은 앞뒤 공백을 제거한다.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// CSV 리더에서 파싱.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(DataError::Parse("CSV has no header row".to_string()));
        }

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(DataError::Parse(format!(
                    "row {} has {} fields, header has {}",
                    line + 1,
                    record.len(),
                    headers.len()
                )));
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// 파일에서 로드.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 데이터 행 수
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// 컬럼명으로 인덱스 조회 (정확히 일치)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 저장 전 정리.
    ///
    /// 컬럼이 2개 이상이면 그대로 둔다. 컬럼이 1개뿐이면 셀 앞뒤 공백만
    /// 제거한다 (종목 코드/종목명으로 분리하지는 않는다).
    pub fn normalize(mut self) -> Self {
        if self.column_count() == 1 {
            tracing::warn!("단일 컬럼 테이블: 공백만 정리하고 컬럼 분리는 하지 않음");
            for row in &mut self.rows {
                for cell in row.iter_mut() {
                    let trimmed = cell.trim();
                    if trimmed.len() != cell.len() {
                        *cell = trimmed.to_string();
                    }
                }
            }
        }
        self
    }

    /// CSV로 기록 (헤더 포함).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 파일로 저장 (전체 덮어쓰기). 기록한 행 수를 반환한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush()?;
        Ok(self.len())
    }

    /// 분석용 종목 목록 추출.
    ///
    /// `Symbol` 컬럼이 없으면 [`DataError::MissingColumn`]. `Company Name`
    /// 컬럼이 없으면 종목명은 빈 문자열이다. 빈 종목 코드는 건너뛴다.
    pub fn symbol_list(&self) -> Result<SymbolList> {
        let symbol_idx = self
            .column_index(SYMBOL_COLUMN)
            .ok_or_else(|| DataError::MissingColumn {
                column: SYMBOL_COLUMN.to_string(),
            })?;
        let company_idx = self.column_index(COMPANY_COLUMN);

        let mut symbols = Vec::with_capacity(self.rows.len());
        let mut names = HashMap::with_capacity(self.rows.len());

        for row in &self.rows {
            let symbol = row.get(symbol_idx).map(|s| s.trim()).unwrap_or_default();
            if symbol.is_empty() {
                continue;
            }

            let name = company_idx
                .and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default();

            symbols.push(symbol.to_string());
            names.insert(symbol.to_string(), name);
        }

        Ok(SymbolList { symbols, names })
    }
}

/// 분석 대상 종목 목록.
#[derive(Debug, Clone, Default)]
pub struct SymbolList {
    symbols: Vec<String>,
    names: HashMap<String, String>,
}

impl SymbolList {
    /// 테이블 순서대로의 종목 코드
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// 종목명 조회 (없으면 빈 문자열)
    pub fn company_name(&self, symbol: &str) -> &str {
        self.names.get(symbol).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
