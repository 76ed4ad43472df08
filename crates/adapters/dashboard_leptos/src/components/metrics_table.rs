//! Metrics table component.

use leptos::prelude::*;
use metricboard_app::view::TableView;

/// One header cell per visible column and one row per record.
#[component]
pub fn MetricsTable(
    /// Headers and pre-formatted cells.
    table: TableView,
) -> impl IntoView {
    let TableView { headers, rows, .. } = table;

    view! {
        <div class="table-container">
            <table>
                <thead>
                    <tr>
                        {headers.into_iter().map(|header| view! { <th>{header}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().map(|row| view! { <MetricsRow cells=row/> }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn MetricsRow(cells: Vec<String>) -> impl IntoView {
    view! {
        <tr>
            {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
        </tr>
    }
}
