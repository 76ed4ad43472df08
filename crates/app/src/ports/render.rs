//! Render ports: controllers push their view state through these after
//! every change.

use std::rc::Rc;

use crate::controllers::auth::AuthState;
use crate::controllers::dashboard::DashboardState;

/// Displays the login/dashboard switch and the login form.
pub trait AuthRenderer {
    fn render(&self, state: &AuthState);
}

/// Displays the dashboard.
pub trait DashboardRenderer {
    fn render(&self, state: &DashboardState);

    /// Route the user to the login view (no session token is stored).
    fn show_login(&self);
}

impl<T: AuthRenderer> AuthRenderer for Rc<T> {
    fn render(&self, state: &AuthState) {
        (**self).render(state);
    }
}

impl<T: DashboardRenderer> DashboardRenderer for Rc<T> {
    fn render(&self, state: &DashboardState) {
        (**self).render(state);
    }

    fn show_login(&self) {
        (**self).show_login();
    }
}
