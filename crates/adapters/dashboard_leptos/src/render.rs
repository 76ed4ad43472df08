//! Renderers that push controller state into Leptos signals.

use std::rc::Rc;

use leptos::prelude::*;
use metricboard_app::controllers::{AuthState, DashboardState};
use metricboard_app::ports::{AuthRenderer, DashboardRenderer};

use crate::BrowserAuth;

pub struct SignalAuthRenderer {
    state: WriteSignal<AuthState>,
}

impl SignalAuthRenderer {
    pub fn new(state: WriteSignal<AuthState>) -> Self {
        Self { state }
    }
}

impl AuthRenderer for SignalAuthRenderer {
    fn render(&self, state: &AuthState) {
        self.state.set(state.clone());
    }
}

/// Dashboard renderer. Routing to the login view re-initializes the auth
/// controller, which finds no token and switches the root view.
pub struct SignalDashboardRenderer {
    state: WriteSignal<DashboardState>,
    auth: Rc<BrowserAuth>,
}

impl SignalDashboardRenderer {
    pub fn new(state: WriteSignal<DashboardState>, auth: Rc<BrowserAuth>) -> Self {
        Self { state, auth }
    }
}

impl DashboardRenderer for SignalDashboardRenderer {
    fn render(&self, state: &DashboardState) {
        self.state.set(state.clone());
    }

    fn show_login(&self) {
        self.auth.initialize();
    }
}
