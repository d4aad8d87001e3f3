//! 사고 목록 테이블.
//!
//! 서버 순서(최신순)를 원본으로 보관하고 정렬/페이지는 인덱스 뷰로 계산한다.

use roadwatch_core::config::TableConfig;
use roadwatch_core::error::CoreError;
use roadwatch_core::models::accident::{AccidentRecord, Severity};
use roadwatch_core::ports::api_client::AccidentApi;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};

use crate::display::{format_number, MISSING};

/// 목록 조회 실패 문구
pub const LIST_LOAD_FAILURE: &str = "Failed to load accident list";

/// 테이블 컬럼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    City,
    Latitude,
    Longitude,
    SeverityPercent,
    Severity,
    Details,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::City,
        Column::Latitude,
        Column::Longitude,
        Column::SeverityPercent,
        Column::Severity,
        Column::Details,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::City => "City",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::SeverityPercent => "Severity (%)",
            Column::Severity => "Severity",
            Column::Details => "View Details",
        }
    }

    /// CLI 인자 파싱 (`city`, `lat`, `severity-percent` 등)
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "city" => Ok(Column::City),
            "latitude" | "lat" => Ok(Column::Latitude),
            "longitude" | "lon" | "lng" => Ok(Column::Longitude),
            "severity-percent" | "percent" | "severity%" => Ok(Column::SeverityPercent),
            "severity" => Ok(Column::Severity),
            "details" | "id" => Ok(Column::Details),
            other => Err(CoreError::Validation {
                field: "column".to_string(),
                message: format!("알 수 없는 컬럼: {other}"),
            }),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 렌더링된 셀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// 뱃지 스타일 클래스 (심각도 컬럼)
    pub badge: Option<&'static str>,
    /// 링크 대상 (상세 컬럼)
    pub link: Option<String>,
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            link: None,
        }
    }
}

/// 상세 화면 경로
pub fn detail_path(accident_id: &str) -> String {
    format!("/dashboard/accident/{accident_id}")
}

#[derive(Debug, PartialEq)]
enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

fn severity_rank(severity: &Severity) -> f64 {
    match severity {
        Severity::Low => 1.0,
        Severity::Medium => 2.0,
        Severity::High => 3.0,
        Severity::Other(_) => 0.0,
    }
}

fn sort_key(record: &AccidentRecord, column: Column) -> Option<SortKey> {
    match column {
        Column::City => record
            .city
            .as_deref()
            .map(|c| SortKey::Text(c.to_lowercase())),
        Column::Latitude => record.latitude.map(SortKey::Number),
        Column::Longitude => record.longitude.map(SortKey::Number),
        Column::SeverityPercent => record.severity_in_percentage.map(SortKey::Number),
        Column::Severity => record
            .severity
            .as_ref()
            .map(|_| SortKey::Number(severity_rank(&record.severity_level()))),
        Column::Details => Some(SortKey::Text(record.id.clone())),
    }
}

/// 사고 목록 테이블 상태
#[derive(Debug, Clone)]
pub struct AccidentTable {
    /// 서버 순서 그대로의 행
    rows: Vec<AccidentRecord>,
    /// 현재 표시 순서 (rows 인덱스)
    order: Vec<usize>,
    sort: Option<(Column, SortDirection)>,
    page_index: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
    load_error: Option<String>,
}

impl AccidentTable {
    pub fn new(config: &TableConfig) -> Self {
        let mut page_size_options: Vec<usize> = config
            .page_size_options
            .iter()
            .copied()
            .filter(|&s| s > 0)
            .collect();
        if page_size_options.is_empty() {
            page_size_options = TableConfig::default().page_size_options;
        }
        let page_size = if page_size_options.contains(&config.page_size) {
            config.page_size
        } else {
            warn!(
                "허용되지 않는 페이지 크기 {} → {}",
                config.page_size, page_size_options[0]
            );
            page_size_options[0]
        };

        Self {
            rows: Vec::new(),
            order: Vec::new(),
            sort: None,
            page_index: 0,
            page_size,
            page_size_options,
            load_error: None,
        }
    }

    /// 서버에서 목록을 불러온다. 실패 시 빈 테이블과 실패 문구를 남긴다.
    pub async fn load(&mut self, api: &dyn AccidentApi) {
        match api.list_accidents().await {
            Ok(rows) => {
                debug!("사고 목록 {}건 로드", rows.len());
                self.set_rows(rows);
            }
            Err(e) => {
                warn!("사고 목록 조회 실패: {e}");
                self.set_rows(Vec::new());
                self.load_error = Some(LIST_LOAD_FAILURE.to_string());
            }
        }
    }

    /// 행 교체. 현재 정렬은 유지하고 첫 페이지로 이동한다.
    pub fn set_rows(&mut self, rows: Vec<AccidentRecord>) {
        self.rows = rows;
        self.load_error = None;
        self.page_index = 0;
        self.reorder();
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }

    /// 컬럼 정렬 (안정 정렬, 값 없는 행은 방향과 무관하게 뒤로)
    pub fn sort_by(&mut self, column: Column, direction: SortDirection) {
        self.sort = Some((column, direction));
        self.page_index = 0;
        self.reorder();
    }

    /// 서버 순서로 복귀
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.page_index = 0;
        self.reorder();
    }

    fn reorder(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if let Some((column, direction)) = self.sort {
            let keys: Vec<Option<SortKey>> =
                self.rows.iter().map(|r| sort_key(r, column)).collect();
            order.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
                (Some(ka), Some(kb)) => match direction {
                    SortDirection::Ascending => ka.compare(kb),
                    SortDirection::Descending => kb.compare(ka),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        self.order = order;
    }

    // ── 페이지 ──

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// 전체 페이지 수 (빈 테이블도 1)
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    pub fn last_page(&mut self) {
        self.page_index = self.page_count() - 1;
    }

    /// 특정 페이지로 이동 (범위를 벗어나면 마지막 페이지)
    pub fn go_to_page(&mut self, index: usize) {
        self.page_index = index.min(self.page_count() - 1);
    }

    /// 페이지 크기 변경. 허용 목록에 있어야 하며 첫 페이지로 이동한다.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), CoreError> {
        if !self.page_size_options.contains(&size) {
            return Err(CoreError::Validation {
                field: "page_size".to_string(),
                message: format!(
                    "허용되지 않는 페이지 크기: {size} (허용: {:?})",
                    self.page_size_options
                ),
            });
        }
        self.page_size = size;
        self.page_index = 0;
        Ok(())
    }

    /// 현재 페이지의 행
    pub fn page_rows(&self) -> Vec<&AccidentRecord> {
        self.order
            .iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .map(|&i| &self.rows[i])
            .collect()
    }

    // ── 렌더링 ──

    /// 셀 렌더링
    pub fn cell(record: &AccidentRecord, column: Column) -> Cell {
        match column {
            Column::City => Cell::text(record.city.as_deref().unwrap_or(MISSING)),
            Column::Latitude => Cell::text(
                record
                    .latitude
                    .map(format_number)
                    .unwrap_or_else(|| MISSING.to_string()),
            ),
            Column::Longitude => Cell::text(
                record
                    .longitude
                    .map(format_number)
                    .unwrap_or_else(|| MISSING.to_string()),
            ),
            Column::SeverityPercent => Cell::text(
                record
                    .severity_in_percentage
                    .map(|p| format!("{}%", format_number(p)))
                    .unwrap_or_else(|| MISSING.to_string()),
            ),
            Column::Severity => match record.severity.as_deref() {
                Some(_) => {
                    let level = record.severity_level();
                    Cell {
                        text: level.to_string(),
                        badge: Some(level.badge().class_name()),
                        link: None,
                    }
                }
                None => Cell::text(MISSING),
            },
            Column::Details => Cell {
                text: "View Details".to_string(),
                badge: None,
                link: Some(detail_path(&record.id)),
            },
        }
    }

    /// 한 행의 모든 셀
    pub fn render_row(record: &AccidentRecord) -> Vec<Cell> {
        Column::ALL
            .iter()
            .map(|&column| Self::cell(record, column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockApi, Reply};

    fn record(id: &str, city: Option<&str>, percent: Option<f64>, severity: Option<&str>) -> AccidentRecord {
        AccidentRecord {
            id: id.to_string(),
            video_name: None,
            result: Some("Accident".to_string()),
            severity: severity.map(str::to_string),
            severity_in_percentage: percent,
            address: None,
            city: city.map(str::to_string),
            latitude: Some(12.9698),
            longitude: Some(77.75),
            image_url: None,
            date: None,
        }
    }

    fn table_with(rows: Vec<AccidentRecord>) -> AccidentTable {
        let mut table = AccidentTable::new(&TableConfig::default());
        table.set_rows(rows);
        table
    }

    fn ids(table: &AccidentTable) -> Vec<&str> {
        table.page_rows().iter().map(|r| r.id.as_str()).collect()
    }

    fn many(n: usize) -> Vec<AccidentRecord> {
        (0..n)
            .map(|i| record(&format!("r{i}"), Some("Pune"), Some(i as f64), Some("Low")))
            .collect()
    }

    #[test]
    fn renders_cells() {
        let row = record("a1", Some("Bengaluru"), Some(82.0), Some("High"));
        let cells = AccidentTable::render_row(&row);

        assert_eq!(cells.len(), Column::ALL.len());
        assert_eq!(cells[0].text, "Bengaluru");
        assert_eq!(cells[1].text, "12.9698");
        assert_eq!(cells[3].text, "82%");
        assert_eq!(cells[4].text, "High");
        assert_eq!(cells[4].badge, Some("bg-red-500"));
        assert_eq!(cells[5].link.as_deref(), Some("/dashboard/accident/a1"));
    }

    #[test]
    fn badge_classes_and_missing_values() {
        let medium = record("m", None, None, Some("medium"));
        let cell = AccidentTable::cell(&medium, Column::Severity);
        assert_eq!(cell.badge, Some("bg-orange-500"));

        let odd = record("o", None, None, Some("Minor"));
        assert_eq!(
            AccidentTable::cell(&odd, Column::Severity).badge,
            Some("bg-green-500")
        );

        let bare = record("b", None, None, None);
        assert_eq!(AccidentTable::cell(&bare, Column::City).text, MISSING);
        assert_eq!(AccidentTable::cell(&bare, Column::SeverityPercent).text, MISSING);
        assert_eq!(AccidentTable::cell(&bare, Column::Severity).badge, None);
    }

    #[test]
    fn sort_keeps_missing_values_last() {
        let mut table = table_with(vec![
            record("a", Some("Pune"), Some(40.0), Some("Low")),
            record("b", None, None, None),
            record("c", Some("agra"), Some(90.0), Some("High")),
            record("d", Some("Mumbai"), Some(40.0), Some("Medium")),
        ]);
        assert_eq!(ids(&table), vec!["a", "b", "c", "d"]);

        table.sort_by(Column::City, SortDirection::Ascending);
        assert_eq!(ids(&table), vec!["c", "d", "a", "b"]);

        table.sort_by(Column::City, SortDirection::Descending);
        assert_eq!(ids(&table), vec!["a", "d", "c", "b"]);

        // 동률(40%)은 원래 순서 유지
        table.sort_by(Column::SeverityPercent, SortDirection::Ascending);
        assert_eq!(ids(&table), vec!["a", "d", "c", "b"]);

        table.sort_by(Column::Severity, SortDirection::Descending);
        assert_eq!(ids(&table), vec!["c", "d", "a", "b"]);

        table.clear_sort();
        assert_eq!(ids(&table), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn paging() {
        let mut table = table_with(many(25));
        assert_eq!(table.page_size(), 10);
        assert_eq!(table.page_count(), 3);
        assert!(!table.can_previous_page());
        assert!(table.can_next_page());

        table.next_page();
        assert_eq!(table.page_index(), 1);
        assert_eq!(ids(&table)[0], "r10");

        table.last_page();
        assert_eq!(table.page_index(), 2);
        assert_eq!(table.page_rows().len(), 5);
        assert!(!table.can_next_page());
        table.next_page();
        assert_eq!(table.page_index(), 2);

        table.previous_page();
        assert_eq!(table.page_index(), 1);
        table.first_page();
        assert_eq!(table.page_index(), 0);
        table.previous_page();
        assert_eq!(table.page_index(), 0);

        table.go_to_page(99);
        assert_eq!(table.page_index(), 2);
    }

    #[test]
    fn page_size_changes_reset_page() {
        let mut table = table_with(many(25));
        table.last_page();

        table.set_page_size(20).unwrap();
        assert_eq!(table.page_index(), 0);
        assert_eq!(table.page_count(), 2);

        assert!(table.set_page_size(15).is_err());
        assert_eq!(table.page_size(), 20);
    }

    #[test]
    fn empty_table_has_one_page() {
        let table = table_with(Vec::new());
        assert_eq!(table.page_count(), 1);
        assert!(table.page_rows().is_empty());
        assert!(!table.can_next_page());
    }

    #[test]
    fn invalid_configured_page_size_falls_back() {
        let config = TableConfig {
            page_size: 7,
            ..TableConfig::default()
        };
        let table = AccidentTable::new(&config);
        assert_eq!(table.page_size(), 10);
    }

    #[test]
    fn column_names_parse() {
        assert_eq!(Column::parse("City").unwrap(), Column::City);
        assert_eq!(Column::parse("percent").unwrap(), Column::SeverityPercent);
        assert!(Column::parse("speed").is_err());
    }

    #[tokio::test]
    async fn load_success_and_failure() {
        let api = MockApi::default().accidents(Reply::Json(
            r#"[{"id":"a1","city":"Pune"},{"id":"a2","city":null}]"#,
        ));
        let mut table = AccidentTable::new(&TableConfig::default());
        table.load(&api).await;
        assert_eq!(table.len(), 2);
        assert!(table.load_error().is_none());

        let failing = MockApi::default();
        table.load(&failing).await;
        assert!(table.is_empty());
        assert_eq!(table.load_error(), Some(LIST_LOAD_FAILURE));
    }
}
