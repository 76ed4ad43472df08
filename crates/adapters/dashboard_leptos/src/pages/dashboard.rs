use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use metricboard_app::controllers::DashboardState;
use metricboard_app::view::SummaryView;
use metricboard_domain::filter::SortOrder;

use crate::components::{
    FilterBar, Loading, MetricsTable, PaginationControls, StatCard, UserHeader,
};
use crate::render::SignalDashboardRenderer;
use crate::{AuthContext, BrowserDashboard, config, use_auth};

type Handle = StoredValue<Option<Rc<BrowserDashboard>>, LocalStorage>;

fn build(auth: AuthContext, state: WriteSignal<DashboardState>) -> Option<Rc<BrowserDashboard>> {
    let controller = auth.controller()?;
    let api = auth.api()?;
    let renderer = SignalDashboardRenderer::new(state, controller);
    Some(Rc::new(BrowserDashboard::new(
        api,
        renderer,
        &config::client_config(),
    )))
}

/// Run `action` against the controller.
fn with_dashboard(handle: Handle, action: impl FnOnce(&BrowserDashboard)) {
    if let Some(Some(dashboard)) = handle.try_get_value() {
        action(&dashboard);
    }
}

/// Spawn `action` against the controller on the local executor.
fn spawn_with<F, Fut>(handle: Handle, action: F)
where
    F: FnOnce(Rc<BrowserDashboard>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(Some(dashboard)) = handle.try_get_value() {
        spawn_local(action(dashboard));
    }
}

#[component]
fn SummaryCards(summary: SummaryView) -> impl IntoView {
    view! {
        <section class="stats-grid">
            <StatCard label="Total records" value=summary.total_records.clone()/>
            <StatCard label="Available dates" value=summary.total_dates.to_string()/>
            <StatCard label="Role" value=summary.role.clone()/>
            <StatCard label="Cost data" value=summary.cost_visibility_label()/>
        </section>
    }
}

/// Dashboard page: header, summary cards, filters, the metrics table and
/// pagination.
#[component]
pub fn Dashboard() -> impl IntoView {
    let auth = use_auth();
    let (state, set_state) = signal(DashboardState::default());
    let handle: Handle = StoredValue::new_local(build(auth, set_state));

    spawn_with(handle, |d| async move { d.load_initial_data().await });

    let (logout_error, set_logout_error) = signal(None::<String>);
    let on_logout = move || {
        if let Some(controller) = auth.controller() {
            match controller.logout() {
                Ok(_) => set_logout_error.set(None),
                Err(err) => set_logout_error.set(Some(err.to_string())),
            }
        }
    };

    let header = move || {
        view! { <UserHeader user=state.with(|s| s.user.clone()) on_logout=on_logout/> }
    };

    let summary = move || {
        state
            .with(|s| s.summary.clone())
            .map(|summary| view! { <SummaryCards summary/> })
    };

    let content = move || {
        state.with(|s| {
            let error = s
                .error_message()
                .map(|message| view! { <div class="error">{message.to_string()}</div> });
            let body = if s.is_loading() {
                Some(view! { <Loading/> }.into_any())
            } else if s.shows_empty_state() {
                Some(view! { <div class="empty-state">"No records found"</div> }.into_any())
            } else if let (true, Some(table)) = (s.shows_table(), s.table.clone()) {
                Some(view! { <MetricsTable table/> }.into_any())
            } else {
                None
            };
            let pagination = match (s.shows_pagination(), s.pagination.clone()) {
                (true, Some(pagination)) => Some(view! {
                    <PaginationControls
                        pagination
                        records_count=s.records_count.clone()
                        on_previous=move || spawn_with(handle, |d| async move {
                            d.previous_page().await;
                        })
                        on_next=move || spawn_with(handle, |d| async move {
                            d.next_page().await;
                        })
                    />
                }),
                _ => None,
            };
            view! {
                {error}
                {body}
                {pagination}
            }
        })
    };

    let last_updated = move || {
        state
            .with(|s| s.last_updated.clone())
            .map(|at| view! { <footer class="last-updated">"Last updated: " {at}</footer> })
    };

    let logout_banner = move || {
        logout_error
            .get()
            .map(|message| view! { <div class="error">{message}</div> })
    };

    view! {
        <div class="dashboard">
            {header}
            {logout_banner}
            {summary}
            <FilterBar
                state
                on_date=move |date| with_dashboard(handle, |d| d.set_date_filter(Some(date)))
                on_sort_column=move |column| {
                    with_dashboard(handle, |d| d.set_sort_column(Some(column)));
                }
                on_sort_order=move |order: SortOrder| {
                    with_dashboard(handle, |d| d.set_sort_order(order));
                }
                on_apply=move || spawn_with(handle, |d| async move { d.apply_filters(true).await })
                on_clear=move || spawn_with(handle, |d| async move { d.clear_filters().await })
                on_refresh=move || spawn_with(handle, |d| async move { d.refresh().await })
            />
            <section class="results">{content}</section>
            {last_updated}
        </div>
    }
}
