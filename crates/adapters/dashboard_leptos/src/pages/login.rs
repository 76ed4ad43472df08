use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use metricboard_app::controllers::{AuthState, LoginForm};

use crate::use_auth;

/// Login page. A failed attempt keeps the typed username and shows the
/// server's message under the form.
#[component]
pub fn Login() -> impl IntoView {
    let auth = use_auth();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let form = Memo::new(move |_| match auth.state.get() {
        AuthState::LoggedOut(form) => form,
        AuthState::LoggedIn => LoginForm::default(),
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(controller) = auth.controller() else {
            return;
        };
        let username = username.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            controller.login(&username, &password).await;
        });
    };

    view! {
        <div class="login-container">
            <form class="login-form" on:submit=on_submit>
                <h1>"Metrics Dashboard"</h1>
                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    prop:value=username
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || form.get().message.map(|message| view! { <p class="error">{message}</p> })}
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || form.with(|f| f.submitting)
                >
                    {move || form.with(LoginForm::submit_label)}
                </button>
            </form>
        </div>
    }
}
