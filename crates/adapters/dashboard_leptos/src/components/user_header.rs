//! Header with the greeting, role badge and logout button.

use leptos::prelude::*;
use metricboard_app::view::UserView;

#[component]
pub fn UserHeader(user: Option<UserView>, on_logout: impl Fn() + 'static) -> impl IntoView {
    let user = user.map(|UserView { greeting, role }| {
        let badge = format!("badge role-{role}");
        view! {
            <span class="greeting">{greeting}</span>
            <span class=badge>{role}</span>
        }
    });

    view! {
        <header class="header">
            <h1>"Metrics Dashboard"</h1>
            <div class="user-info">
                {user}
                <button class="btn btn-secondary" on:click=move |_| on_logout()>"Logout"</button>
            </div>
        </header>
    }
}
