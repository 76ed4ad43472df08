//! Dashboard controller: summary, filters, metrics table and pagination.

use std::cell::{Cell, RefCell};

use futures::future::try_join;
use metricboard_domain::error::ApiError;
use metricboard_domain::filter::{FilterState, SortOrder};
use metricboard_domain::format::Locale;
use metricboard_domain::metrics::MetricsPage;
use metricboard_domain::time::{format_timestamp, now};

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::ports::{DashboardRenderer, HttpTransport, TokenStore};
use crate::view::{FilterOptions, PaginationView, SummaryView, TableView, UserView};

/// What the main content area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DashboardStatus {
    /// Nothing loaded yet.
    #[default]
    Idle,
    /// A fetch is in flight; table and pagination are hidden.
    Loading,
    /// The last page fetch returned records.
    Ready,
    /// The last page fetch returned no records.
    Empty,
}

/// Everything the dashboard view displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub user: Option<UserView>,
    pub summary: Option<SummaryView>,
    pub options: FilterOptions,
    pub filter: FilterState,
    pub total_pages: u32,
    pub table: Option<TableView>,
    pub pagination: Option<PaginationView>,
    pub status: DashboardStatus,
    /// Banner for the last failed fetch; what was shown before stays shown.
    pub error: Option<String>,
    /// e.g. `12.345 records`.
    pub records_count: Option<String>,
    /// When the table was last refreshed.
    pub last_updated: Option<String>,
}

impl DashboardState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == DashboardStatus::Loading
    }

    #[must_use]
    pub fn shows_table(&self) -> bool {
        self.table.is_some() && self.status == DashboardStatus::Ready
    }

    #[must_use]
    pub fn shows_pagination(&self) -> bool {
        self.shows_table() && self.pagination.is_some()
    }

    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        self.status == DashboardStatus::Empty
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// What the content area showed before the current fetch started.
    fn settled_status(&self) -> DashboardStatus {
        match (&self.table, &self.records_count) {
            (Some(_), _) => DashboardStatus::Ready,
            (None, Some(_)) => DashboardStatus::Empty,
            (None, None) => DashboardStatus::Idle,
        }
    }
}

/// Drives the dashboard view.
///
/// Page fetches are sequenced: each takes a monotonically increasing id and
/// a response is only applied if no newer fetch has been issued since.
pub struct DashboardController<T, S, R> {
    api: ApiClient<T, S>,
    renderer: R,
    locale: Locale,
    page_size: u32,
    state: RefCell<DashboardState>,
    latest_request: Cell<u64>,
}

impl<T, S, R> DashboardController<T, S, R>
where
    T: HttpTransport,
    S: TokenStore,
    R: DashboardRenderer,
{
    pub fn new(api: ApiClient<T, S>, renderer: R, config: &ClientConfig) -> Self {
        Self {
            api,
            renderer,
            locale: config.locale,
            page_size: config.page_size,
            state: RefCell::new(DashboardState::default()),
            latest_request: Cell::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    fn update<F: FnOnce(&mut DashboardState)>(&self, f: F) {
        f(&mut self.state.borrow_mut());
        self.renderer.render(&self.state.borrow());
    }

    fn fail(&self, err: &ApiError) {
        tracing::warn!(error = %err, "dashboard fetch failed");
        if err.is_missing_token() {
            self.renderer.show_login();
        }
        let message = err.to_string();
        self.update(|state| {
            state.status = state.settled_status();
            state.error = Some(message);
        });
    }

    /// Fetch identity and summary concurrently, fill the filter controls,
    /// then fetch the first page.
    pub async fn load_initial_data(&self) {
        self.update(|state| state.status = DashboardStatus::Loading);

        let joined = try_join(self.api.current_user(), self.api.metrics_summary()).await;
        let (user, summary) = match joined {
            Ok(pair) => pair,
            Err(err) => return self.fail(&err),
        };

        let locale = self.locale;
        self.update(|state| {
            state.user = Some(UserView::from(&user));
            state.summary = Some(SummaryView::from_summary(&summary, locale));
            state.options = FilterOptions::from_summary(&summary);
        });

        self.apply_filters(true).await;
    }

    /// Re-fetch the current page (or page 1 when `reset_page`) with the
    /// active filter and sort.
    pub async fn apply_filters(&self, reset_page: bool) {
        let request_id = self.latest_request.get() + 1;
        self.latest_request.set(request_id);

        let mut query = None;
        let page_size = self.page_size;
        self.update(|state| {
            if reset_page {
                state.filter.reset_page();
            }
            state.status = DashboardStatus::Loading;
            query = Some(state.filter.to_query(page_size));
        });
        let Some(query) = query else { return };

        tracing::debug!(request_id, page = query.page, "fetching metrics page");
        let result = self.api.metrics_data(&query).await;

        if request_id != self.latest_request.get() {
            tracing::debug!(request_id, "discarding stale metrics response");
            return;
        }

        match result {
            Ok(page) => self.show_page(&page),
            Err(err) => self.fail(&err),
        }
    }

    fn show_page(&self, page: &MetricsPage) {
        let pagination = page.pagination.normalized();
        let table = TableView::render(page, self.locale);
        let records_count = format!("{} records", self.locale.format_count(page.total_records));
        let last_updated = format_timestamp(now(), self.locale);

        self.update(|state| {
            state.filter.current_page = pagination.current_page;
            state.total_pages = pagination.total_pages;
            state.records_count = Some(records_count);
            state.last_updated = Some(last_updated);
            state.error = None;
            if let Some(table) = table {
                state.table = Some(table);
                state.pagination = Some(PaginationView::from(pagination));
                state.status = DashboardStatus::Ready;
            } else {
                state.table = None;
                state.pagination = None;
                state.status = DashboardStatus::Empty;
            }
        });
    }

    /// Select a date; an empty value means all dates. Does not fetch.
    pub fn set_date_filter(&self, date: Option<String>) {
        self.update(|state| state.filter.set_date_filter(date));
    }

    /// Select a sort column; an empty value means no sorting. Does not fetch.
    pub fn set_sort_column(&self, column: Option<String>) {
        self.update(|state| state.filter.set_sort_column(column));
    }

    /// Select the sort direction. Does not fetch.
    pub fn set_sort_order(&self, order: SortOrder) {
        self.update(|state| state.filter.sort_order = order);
    }

    /// Reset date, sort column and order, then fetch page 1.
    pub async fn clear_filters(&self) {
        self.update(|state| state.filter.clear());
        self.apply_filters(true).await;
    }

    /// Move to the next page. Returns `false` (and does nothing) on the last page.
    pub async fn next_page(&self) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            if state.filter.current_page < state.total_pages {
                state.filter.current_page += 1;
                true
            } else {
                false
            }
        };
        if moved {
            self.apply_filters(false).await;
        }
        moved
    }

    /// Move to the previous page. Returns `false` (and does nothing) on page 1.
    pub async fn previous_page(&self) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            if state.filter.current_page > 1 {
                state.filter.current_page -= 1;
                true
            } else {
                false
            }
        };
        if moved {
            self.apply_filters(false).await;
        }
        moved
    }

    /// Jump to `page` and fetch it.
    ///
    /// The page is clamped into the known range once a page has been
    /// fetched; before that the server's answer is normalized instead.
    pub async fn go_to_page(&self, page: u32) {
        {
            let mut state = self.state.borrow_mut();
            let upper = match state.total_pages {
                0 => u32::MAX,
                total => total,
            };
            state.filter.current_page = page.clamp(1, upper);
        }
        self.apply_filters(false).await;
    }

    /// Reload identity, summary and page 1.
    pub async fn refresh(&self) {
        self.load_initial_data().await;
    }
}
