//! Filter state: the date filter, sort column, sort order and page the user
//! has selected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsQuery;

/// Direction of the sort applied by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire representation used in the `sort_order` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort order `{0}`, expected `asc` or `desc`")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}

/// Filter, sort and page selected in the dashboard.
///
/// Mutated only by user interaction. Any change to the filter or sort
/// resets `current_page` to 1 through [`FilterState::reset_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub date_filter: Option<String>,
    pub sort_column: Option<String>,
    pub sort_order: SortOrder,
    pub current_page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            date_filter: None,
            sort_column: None,
            sort_order: SortOrder::Asc,
            current_page: 1,
        }
    }
}

/// Normalize a select value: the empty option means "no filter".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FilterState {
    pub fn set_date_filter(&mut self, date: Option<String>) {
        self.date_filter = non_empty(date);
    }

    pub fn set_sort_column(&mut self, column: Option<String>) {
        self.sort_column = non_empty(column);
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Drop the date filter and sort column, sort ascending, go to page 1.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the backend query for the current selection.
    #[must_use]
    pub fn to_query(&self, page_size: u32) -> MetricsQuery {
        MetricsQuery {
            date_filter: self.date_filter.clone(),
            sort_by: self.sort_column.clone(),
            sort_order: self.sort_order,
            page: self.current_page.max(1),
            page_size,
        }
    }
}
