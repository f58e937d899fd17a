use chrono::{DateTime, Utc};
use listening_survey_types::TestKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AdminError;

/// Page sizes offered by the response table.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];

/// One submitted response as listed in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRow {
    #[serde(rename = "_id")]
    pub id: String,

    /// Name of the test the response was given for.
    pub name: String,

    pub created_at: DateTime<Utc>,

    #[serde(skip)]
    pub selected: bool,
}

impl ResponseRow {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
            selected: false,
        }
    }
}

/// State of the select-all checkbox in the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Storage for submitted responses.
pub trait ResponseService {
    /// Delete the responses with the given ids from a test.
    fn delete(&mut self, kind: TestKind, test_id: &str, ids: &[String]) -> anyhow::Result<()>;
}

/// A request to download every response of a test as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub kind: TestKind,
    pub test_id: String,
}

impl ExportRequest {
    /// Route of the download, relative to the API host.
    pub fn path(&self) -> String {
        format!("/api/csv-download/{}?testId={}", self.kind, self.test_id)
    }
}

/// The responses of one test, paged and selectable.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    kind: TestKind,
    test_id: String,
    rows: Vec<ResponseRow>,
    page: usize,
    rows_per_page: usize,
}

impl ResponseTable {
    pub fn new(kind: TestKind, test_id: impl Into<String>, rows: Vec<ResponseRow>) -> Self {
        Self {
            kind,
            test_id: test_id.into(),
            rows,
            page: 0,
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
        }
    }

    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Number of pages needed for all rows (at least one).
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.rows_per_page).max(1)
    }

    /// Jump to a page. Pages past the end show as empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), AdminError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(AdminError::RowsPerPage(rows_per_page));
        }
        self.rows_per_page = rows_per_page;
        Ok(())
    }

    fn page_range(&self) -> std::ops::Range<usize> {
        let start = self
            .page
            .saturating_mul(self.rows_per_page)
            .min(self.rows.len());
        let end = (start + self.rows_per_page).min(self.rows.len());
        start..end
    }

    /// Rows on the current page.
    pub fn current_page(&self) -> &[ResponseRow] {
        &self.rows[self.page_range()]
    }

    /// Header checkbox state for the current page.
    pub fn header_state(&self) -> CheckState {
        let page = self.current_page();
        if page.iter().all(|row| row.selected) {
            CheckState::Checked
        } else if page.iter().any(|row| row.selected) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Select or clear every row on the current page.
    pub fn select_all(&mut self, checked: bool) {
        let range = self.page_range();
        for row in &mut self.rows[range] {
            row.selected = checked;
        }
    }

    /// Select or clear one row. Returns false if no row has this id.
    pub fn select_one(&mut self, id: &str, checked: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.selected = checked;
                true
            }
            None => false,
        }
    }

    /// Ids of the selected rows across all pages.
    pub fn selected_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.id.clone())
            .collect()
    }

    /// Delete the selected responses. Rows are only removed once the
    /// service has accepted the deletion.
    pub fn delete_selected(&mut self, service: &mut dyn ResponseService) -> Result<usize, AdminError> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            debug!(test = %self.test_id, "nothing selected for deletion");
            return Ok(0);
        }

        service.delete(self.kind, &self.test_id, &ids)?;
        self.rows.retain(|row| !row.selected);
        info!(test = %self.test_id, deleted = ids.len(), "responses deleted");
        Ok(ids.len())
    }

    /// The CSV export for this test.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            kind: self.kind,
            test_id: self.test_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn table(count: usize) -> ResponseTable {
        let rows = (0..count)
            .map(|i| {
                ResponseRow::new(
                    format!("r{i}"),
                    "Codec shootout",
                    Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap(),
                )
            })
            .collect();
        ResponseTable::new(TestKind::AbTest, "t1", rows)
    }

    #[test]
    fn pages_slice_rows() {
        let mut table = table(23);
        assert_eq!(table.current_page().len(), 10);
        assert_eq!(table.page_count(), 3);

        table.set_page(2);
        assert_eq!(table.current_page().len(), 3);
        assert_eq!(table.current_page()[0].id, "r20");

        table.set_page(7);
        assert!(table.current_page().is_empty());
    }

    #[test]
    fn rows_per_page_is_restricted() {
        let mut table = table(30);
        table.set_rows_per_page(25).unwrap();
        assert_eq!(table.current_page().len(), 25);
        assert!(matches!(
            table.set_rows_per_page(12),
            Err(AdminError::RowsPerPage(12))
        ));
        assert_eq!(table.rows_per_page(), 25);
    }

    #[test]
    fn header_state_follows_current_page() {
        let mut table = table(15);
        assert_eq!(table.header_state(), CheckState::Unchecked);

        table.select_one("r3", true);
        assert_eq!(table.header_state(), CheckState::Indeterminate);

        table.select_all(true);
        assert_eq!(table.header_state(), CheckState::Checked);

        // Selection of the first page does not leak into the second.
        table.set_page(1);
        assert_eq!(table.header_state(), CheckState::Unchecked);
        assert_eq!(table.selected_ids().len(), 10);
    }

    #[test]
    fn empty_page_counts_as_checked() {
        let table = table(0);
        assert_eq!(table.header_state(), CheckState::Checked);
    }

    #[test]
    fn export_path() {
        let table = table(1);
        assert_eq!(
            table.export_request().path(),
            "/api/csv-download/ab-test?testId=t1"
        );
    }
}
