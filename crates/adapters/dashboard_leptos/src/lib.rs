//! # metricboard-dashboard-leptos
//!
//! Browser rendition of the dashboard: Leptos CSR components on top of the
//! auth and dashboard controllers, with `fetch` and `localStorage` adapters.

use std::rc::Rc;

use leptos::prelude::*;
use metricboard_app::api_client::ApiClient;
use metricboard_app::controllers::{AuthController, AuthState, DashboardController, LoginForm};

mod components;
pub mod config;
mod pages;
mod render;
pub mod storage;
pub mod transport;

use pages::{Dashboard, Login};
use render::{SignalAuthRenderer, SignalDashboardRenderer};
use storage::LocalStorageTokenStore;
use transport::GlooTransport;

pub type BrowserApi = ApiClient<GlooTransport, LocalStorageTokenStore>;
pub type BrowserAuth = AuthController<GlooTransport, LocalStorageTokenStore, SignalAuthRenderer>;
pub type BrowserDashboard =
    DashboardController<GlooTransport, LocalStorageTokenStore, SignalDashboardRenderer>;

/// Shared by both pages: the auth state and the handles needed to act on it.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    controller: StoredValue<Rc<BrowserAuth>, LocalStorage>,
    api: StoredValue<BrowserApi, LocalStorage>,
}

impl AuthContext {
    pub fn controller(&self) -> Option<Rc<BrowserAuth>> {
        self.controller.try_get_value()
    }

    pub fn api(&self) -> Option<BrowserApi> {
        self.api.try_get_value()
    }
}

/// Access the auth context. Must be called below `<App/>`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Root application component.
///
/// Reads the stored token once on mount; afterwards the auth controller
/// decides which page is shown.
#[component]
pub fn App() -> impl IntoView {
    let config = config::client_config();
    let api = ApiClient::new(config.api_base_url, GlooTransport, LocalStorageTokenStore);

    let (state, set_state) = signal(AuthState::LoggedOut(LoginForm::default()));
    let auth = Rc::new(AuthController::new(
        api.clone(),
        SignalAuthRenderer::new(set_state),
    ));
    auth.initialize();

    provide_context(AuthContext {
        state,
        controller: StoredValue::new_local(auth),
        api: StoredValue::new_local(api),
    });

    let logged_in = Memo::new(move |_| state.with(AuthState::is_logged_in));

    view! {
        <main>
            <Show
                when=move || logged_in.get()
                fallback=|| view! { <Login/> }
            >
                <Dashboard/>
            </Show>
        </main>
    }
}
