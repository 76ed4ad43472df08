//! View models: what renderers display, already formatted.

use metricboard_domain::format::{Locale, format_cell, humanize_column};
use metricboard_domain::metrics::{MetricsPage, MetricsSummary, Pagination};
use metricboard_domain::user::User;

/// Header labels and formatted rows of a non-empty metrics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Column keys in display order, as sent by the server.
    pub columns: Vec<String>,
    /// Humanized header labels, one per column.
    pub headers: Vec<String>,
    /// One entry per record, one formatted cell per column.
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Render a page, or `None` when it has no records.
    #[must_use]
    pub fn render(page: &MetricsPage, locale: Locale) -> Option<Self> {
        if page.is_empty() {
            return None;
        }
        let columns = page.columns_visible.clone();
        let headers = columns.iter().map(|c| humanize_column(c)).collect();
        let rows = page
            .data
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| format_cell(record.get(column), column, locale))
                    .collect()
            })
            .collect();
        Some(Self {
            columns,
            headers,
            rows,
        })
    }
}

/// State of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationView {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

impl From<Pagination> for PaginationView {
    fn from(pagination: Pagination) -> Self {
        let pagination = pagination.normalized();
        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            previous_disabled: pagination.is_first(),
            next_disabled: pagination.is_last(),
        }
    }
}

/// The summary cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_records: String,
    pub total_dates: usize,
    pub role: String,
    pub cost_visible: bool,
}

impl SummaryView {
    #[must_use]
    pub fn from_summary(summary: &MetricsSummary, locale: Locale) -> Self {
        Self {
            total_records: locale.format_count(summary.total_records),
            total_dates: summary.available_dates.len(),
            role: summary.user_permissions.role.clone(),
            cost_visible: summary.user_permissions.can_see_cost_micros,
        }
    }

    #[must_use]
    pub fn cost_visibility_label(&self) -> &'static str {
        if self.cost_visible { "Visible" } else { "Hidden" }
    }
}

/// Greeting and role badge in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub greeting: String,
    pub role: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            greeting: format!("Hello, {}", user.username),
            role: user.role.clone(),
        }
    }
}

/// One `<option>` of a select; an empty `value` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Choices offered by the date and sort selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub dates: Vec<SelectOption>,
    pub sort_columns: Vec<SelectOption>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            dates: vec![SelectOption::new("", "All dates")],
            sort_columns: vec![SelectOption::new("", "No sorting")],
        }
    }
}

impl FilterOptions {
    #[must_use]
    pub fn from_summary(summary: &MetricsSummary) -> Self {
        let mut options = Self::default();
        options.dates.extend(
            summary
                .available_dates
                .iter()
                .map(|date| SelectOption::new(date.clone(), date.clone())),
        );
        options.sort_columns.extend(
            summary
                .sortable_columns
                .iter()
                .map(|column| SelectOption::new(column.clone(), humanize_column(column))),
        );
        options
    }
}
