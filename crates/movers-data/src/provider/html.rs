//! HTML 테이블 추출 유틸리티.

use crate::error::{DataError, Result};
use crate::table::ConstituentTable;
use scraper::{ElementRef, Html, Selector};

/// CSS 셀렉터 파싱
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// 요소의 텍스트 조각을 각각 trim한 뒤 이어 붙인다.
///
/// `<td> Reliance <b>Ind</b> </td>` -> "RelianceInd"
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// 테이블 요소에서 헤더(`th`)와 데이터 행(`td`가 있는 `tr`)을 추출한다.
///
/// 데이터 셀이 없는 행(헤더 행 등)은 건너뛴다.
pub fn extract_rows(table: ElementRef<'_>) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let th = selector("th")?;
    let tr = selector("tr")?;
    let td = selector("td")?;

    let headers = table.select(&th).map(stripped_text).collect();

    let rows = table
        .select(&tr)
        .map(|row| row.select(&td).map(stripped_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    Ok((headers, rows))
}

/// 테이블 요소를 구성종목 테이블로 변환. 데이터 행이 없으면 `None`.
pub fn table_from_element(table: ElementRef<'_>) -> Result<Option<ConstituentTable>> {
    let (headers, rows) = extract_rows(table)?;
    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(ConstituentTable::from_scraped(headers, rows)))
}

/// 문서의 첫 번째 `table` 요소
pub fn first_table(document: &Html) -> Result<Option<ElementRef<'_>>> {
    let table = selector("table")?;
    Ok(document.select(&table).next())
}
