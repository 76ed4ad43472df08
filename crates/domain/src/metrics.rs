//! Metrics payloads: summary, pages of records and their pagination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::SortOrder;

/// Column holding monetary values expressed in millionths of a currency unit.
pub const COST_COLUMN: &str = "cost_micros";

/// Number of records requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Aggregate metadata about the whole dataset, independent of pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_records: u64,
    pub available_dates: Vec<String>,
    pub user_permissions: UserPermissions,
    pub sortable_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_accounts: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_campaigns: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

/// What the current role is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissions {
    pub role: String,
    pub can_see_cost_micros: bool,
}

/// Earliest and latest dates present in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

/// A single cell value. Records have no fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Json(serde_json::Value),
}

/// One row of metrics, keyed by column name.
pub type Record = BTreeMap<String, CellValue>;

/// Position of a page within the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Enforce `1 <= current_page <= total_pages`.
    ///
    /// Servers report `total_pages = 0` for empty result sets; that becomes a
    /// single page.
    #[must_use]
    pub fn normalized(self) -> Self {
        let total_pages = self.total_pages.max(1);
        Self {
            current_page: self.current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// A bounded slice of the dataset plus its position metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsPage {
    pub data: Vec<Record>,
    pub columns_visible: Vec<String>,
    pub total_records: u64,
    #[serde(default)]
    pub pagination: Pagination,
}

impl MetricsPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parameters of `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsQuery {
    pub date_filter: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for MetricsQuery {
    fn default() -> Self {
        Self {
            date_filter: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MetricsQuery {
    /// Query parameters in wire order; optional filters are omitted when unset.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sort_order", self.sort_order.as_str().to_string()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(date) = &self.date_filter {
            pairs.push(("date_filter", date.clone()));
        }
        if let Some(column) = &self.sort_by {
            pairs.push(("sort_by", column.clone()));
        }
        pairs
    }
}
