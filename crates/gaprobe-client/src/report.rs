//! Surface-independent report model consumed by the printer.

/// Names used to label printed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnHeader {
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
}

/// One result row. `metrics` holds one value group per date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub dimensions: Vec<String>,
    pub metrics: Vec<Vec<String>>,
}

/// A single query's answer: header plus rows, possibly none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub header: ColumnHeader,
    pub rows: Vec<ReportRow>,
    /// Set when the service has more rows than it returned.
    pub next_page_token: Option<String>,
}

impl Report {
    pub fn new(header: ColumnHeader, rows: Vec<ReportRow>) -> Self {
        Self {
            header,
            rows,
            next_page_token: None,
        }
    }

    /// The call succeeded but matched nothing.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
