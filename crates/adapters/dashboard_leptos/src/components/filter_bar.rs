//! Date and sort selectors with the apply, clear and refresh actions.

use leptos::prelude::*;
use metricboard_app::controllers::DashboardState;
use metricboard_app::view::SelectOption;
use metricboard_domain::filter::SortOrder;

fn options_view(options: Vec<SelectOption>) -> impl IntoView {
    options
        .into_iter()
        .map(|option| view! { <option value=option.value>{option.label}</option> })
        .collect_view()
}

/// Selecting a value only updates the filter; nothing is fetched until
/// "Apply" is pressed.
#[component]
pub fn FilterBar(
    state: ReadSignal<DashboardState>,
    on_date: impl Fn(String) + 'static,
    on_sort_column: impl Fn(String) + 'static,
    on_sort_order: impl Fn(SortOrder) + 'static,
    on_apply: impl Fn() + 'static,
    on_clear: impl Fn() + 'static,
    on_refresh: impl Fn() + 'static,
) -> impl IntoView {
    let date_value = move || state.with(|s| s.filter.date_filter.clone().unwrap_or_default());
    let column_value = move || state.with(|s| s.filter.sort_column.clone().unwrap_or_default());
    let order_value = move || state.with(|s| s.filter.sort_order.as_str());
    let busy = move || state.with(DashboardState::is_loading);

    view! {
        <section class="filters">
            <label>
                "Date"
                <select
                    prop:value=date_value
                    on:change=move |ev| on_date(event_target_value(&ev))
                >
                    {move || options_view(state.with(|s| s.options.dates.clone()))}
                </select>
            </label>
            <label>
                "Sort by"
                <select
                    prop:value=column_value
                    on:change=move |ev| on_sort_column(event_target_value(&ev))
                >
                    {move || options_view(state.with(|s| s.options.sort_columns.clone()))}
                </select>
            </label>
            <label>
                "Order"
                <select
                    prop:value=order_value
                    on:change=move |ev| {
                        if let Ok(order) = event_target_value(&ev).parse() {
                            on_sort_order(order);
                        }
                    }
                >
                    <option value="asc">"Ascending"</option>
                    <option value="desc">"Descending"</option>
                </select>
            </label>
            <div class="filter-actions">
                <button class="btn btn-primary" disabled=busy on:click=move |_| on_apply()>
                    "Apply"
                </button>
                <button class="btn btn-secondary" disabled=busy on:click=move |_| on_clear()>
                    "Clear"
                </button>
                <button class="btn btn-secondary" disabled=busy on:click=move |_| on_refresh()>
                    "Refresh"
                </button>
            </div>
        </section>
    }
}
