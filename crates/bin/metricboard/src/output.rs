//! Terminal rendering of the dashboard views.

use std::io::{self, Write};

use metricboard_app::api_client::HealthStatus;
use metricboard_app::controllers::{AuthState, DashboardState};
use metricboard_app::ports::{AuthRenderer, DashboardRenderer};
use metricboard_app::view::{SummaryView, TableView, UserView};
use metricboard_domain::format::Locale;
use metricboard_domain::metrics::MetricsSummary;

/// Renderer for the terminal: state changes are only traced, the final
/// state is printed by the command once the controller settles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl AuthRenderer for TerminalRenderer {
    fn render(&self, state: &AuthState) {
        match state {
            AuthState::LoggedIn => tracing::debug!("auth: logged in"),
            AuthState::LoggedOut(form) => {
                tracing::debug!(submitting = form.submitting, "auth: logged out");
            }
        }
    }
}

impl DashboardRenderer for TerminalRenderer {
    fn render(&self, state: &DashboardState) {
        tracing::trace!(status = ?state.status, page = state.filter.current_page, "dashboard updated");
    }

    fn show_login(&self) {
        tracing::warn!("no session token, run `metricboard login` first");
    }
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn pad(out: &mut impl Write, cell: &str, to: usize) -> io::Result<()> {
    write!(out, "{cell}{:fill$}", "", fill = to.saturating_sub(width(cell)))
}

/// Print a table with a header row and a separator.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_table(out: &mut impl Write, table: &TableView) -> io::Result<()> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| width(h)).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let write_row = |out: &mut dyn Write, cells: &[String]| -> io::Result<()> {
        let mut line = Vec::new();
        for (i, (cell, w)) in cells.iter().zip(&widths).enumerate() {
            if i > 0 {
                line.extend_from_slice(b"  ");
            }
            if i + 1 == cells.len() {
                line.extend_from_slice(cell.as_bytes());
            } else {
                pad(&mut line, cell, *w)?;
            }
        }
        line.push(b'\n');
        out.write_all(&line)
    };

    write_row(&mut *out, &table.headers)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut *out, &rule)?;
    for row in &table.rows {
        write_row(&mut *out, row)?;
    }
    Ok(())
}

/// Print the summary cards.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_summary(
    out: &mut impl Write,
    summary: &MetricsSummary,
    locale: Locale,
) -> io::Result<()> {
    let view = SummaryView::from_summary(summary, locale);
    writeln!(out, "Total records     {}", view.total_records)?;
    writeln!(out, "Available dates   {}", view.total_dates)?;
    writeln!(out, "Role              {}", view.role)?;
    writeln!(out, "Cost visibility   {}", view.cost_visibility_label())?;
    if let Some(accounts) = summary.unique_accounts {
        writeln!(out, "Accounts          {}", locale.format_count(accounts))?;
    }
    if let Some(campaigns) = summary.unique_campaigns {
        writeln!(out, "Campaigns         {}", locale.format_count(campaigns))?;
    }
    if let Some(range) = &summary.date_range {
        writeln!(out, "Date range        {} to {}", range.earliest, range.latest)?;
    }
    Ok(())
}

/// Print the signed-in user.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_user(out: &mut impl Write, user: &UserView) -> io::Result<()> {
    writeln!(out, "{} ({})", user.greeting, user.role)
}

/// Print the dashboard after a page fetch.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_dashboard(out: &mut impl Write, state: &DashboardState) -> io::Result<()> {
    if let Some(user) = &state.user {
        print_user(out, user)?;
        writeln!(out)?;
    }

    if state.shows_empty_state() {
        writeln!(out, "No records found.")?;
    } else if let (true, Some(table)) = (state.shows_table(), &state.table) {
        print_table(out, table)?;
    }

    if let (true, Some(pagination)) = (state.shows_pagination(), &state.pagination) {
        writeln!(out)?;
        match &state.records_count {
            Some(count) => writeln!(out, "{} \u{b7} {count}", pagination.label())?,
            None => writeln!(out, "{}", pagination.label())?,
        }
    } else if let Some(count) = &state.records_count {
        writeln!(out, "{count}")?;
    }

    if let Some(updated) = &state.last_updated {
        writeln!(out, "Last updated: {updated}")?;
    }
    Ok(())
}

/// Print the backend health.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_health(out: &mut impl Write, base_url: &str, health: &HealthStatus) -> io::Result<()> {
    writeln!(out, "{base_url}: {}", health.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metricboard_app::controllers::DashboardStatus;
    use metricboard_app::view::PaginationView;
    use metricboard_domain::metrics::{DateRange, UserPermissions};

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn table() -> TableView {
        TableView {
            columns: vec!["campaign_id".to_string(), "cost_micros".to_string()],
            headers: vec!["campaign id".to_string(), "cost micros".to_string()],
            rows: vec![
                vec!["c-1".to_string(), "R$\u{a0}2,50".to_string()],
                vec!["campaign-long".to_string(), "R$\u{a0}12,00".to_string()],
            ],
        }
    }

    #[test]
    fn should_align_table_columns() {
        let text = render(|out| print_table(out, &table()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "campaign id    cost micros");
        assert_eq!(lines[1], "-------------  -----------");
        assert_eq!(lines[2], "c-1            R$\u{a0}2,50");
        assert_eq!(lines[3], "campaign-long  R$\u{a0}12,00");
    }

    #[test]
    fn should_print_summary_with_extras() {
        let summary = MetricsSummary {
            total_records: 12345,
            available_dates: vec!["2024-08-16".to_string()],
            user_permissions: UserPermissions {
                role: "admin".to_string(),
                can_see_cost_micros: true,
            },
            sortable_columns: Vec::new(),
            unique_accounts: Some(1200),
            unique_campaigns: None,
            date_range: Some(DateRange {
                earliest: "2024-08-16".to_string(),
                latest: "2024-08-16".to_string(),
            }),
        };

        let text = render(|out| print_summary(out, &summary, Locale::PtBr));

        assert!(text.contains("Total records     12.345"));
        assert!(text.contains("Cost visibility   Visible"));
        assert!(text.contains("Accounts          1.200"));
        assert!(!text.contains("Campaigns"));
        assert!(text.contains("Date range        2024-08-16 to 2024-08-16"));
    }

    #[test]
    fn should_print_dashboard_table_and_pagination() {
        let state = DashboardState {
            user: Some(UserView {
                greeting: "Hello, user1".to_string(),
                role: "admin".to_string(),
            }),
            table: Some(table()),
            pagination: Some(PaginationView {
                current_page: 2,
                total_pages: 3,
                previous_disabled: false,
                next_disabled: false,
            }),
            status: DashboardStatus::Ready,
            records_count: Some("2 records".to_string()),
            ..DashboardState::default()
        };

        let text = render(|out| print_dashboard(out, &state));

        assert!(text.starts_with("Hello, user1 (admin)\n"));
        assert!(text.contains("campaign-long"));
        assert!(text.contains("Page 2 of 3 \u{b7} 2 records"));
    }

    #[test]
    fn should_print_empty_state() {
        let state = DashboardState {
            status: DashboardStatus::Empty,
            records_count: Some("0 records".to_string()),
            ..DashboardState::default()
        };

        let text = render(|out| print_dashboard(out, &state));

        assert!(text.contains("No records found."));
        assert!(text.contains("0 records"));
        assert!(!text.contains("Page"));
    }
}
