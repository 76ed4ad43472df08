//! Previous / next controls with the page label.

use leptos::prelude::*;
use metricboard_app::view::PaginationView;

#[component]
pub fn PaginationControls(
    pagination: PaginationView,
    /// e.g. `12.345 records`.
    records_count: Option<String>,
    on_previous: impl Fn() + 'static,
    on_next: impl Fn() + 'static,
) -> impl IntoView {
    let label = pagination.label();

    view! {
        <div class="pagination">
            <button
                class="btn btn-secondary"
                disabled=pagination.previous_disabled
                on:click=move |_| on_previous()
            >
                "\u{2190} Previous"
            </button>
            <span class="page-info">{label}</span>
            <button
                class="btn btn-secondary"
                disabled=pagination.next_disabled
                on:click=move |_| on_next()
            >
                "Next \u{2192}"
            </button>
            {records_count.map(|count| view! { <span class="records-count">{count}</span> })}
        </div>
    }
}
