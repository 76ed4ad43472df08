//! Auth controller: the LoggedOut/LoggedIn state machine.

use std::cell::RefCell;

use metricboard_domain::error::ApiError;
use metricboard_domain::session::Credentials;

use crate::api_client::ApiClient;
use crate::ports::{AuthRenderer, HttpTransport, TokenStore};

/// Login form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// A login request is in flight; the submit control is disabled.
    pub submitting: bool,
    /// Inline error from the last failed attempt.
    pub message: Option<String>,
}

impl LoginForm {
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Signing in\u{2026}"
        } else {
            "Sign in"
        }
    }
}

/// Which view is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Login form visible.
    LoggedOut(LoginForm),
    /// Dashboard visible.
    LoggedIn,
}

impl AuthState {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Drives login and logout.
///
/// The stored token is the sole source of truth: [`AuthController::initialize`]
/// derives the state from it, and both login and logout end by calling it
/// instead of reloading the page.
pub struct AuthController<T, S, R> {
    api: ApiClient<T, S>,
    renderer: R,
    state: RefCell<AuthState>,
}

impl<T, S, R> AuthController<T, S, R>
where
    T: HttpTransport,
    S: TokenStore,
    R: AuthRenderer,
{
    /// Create a controller. Call [`AuthController::initialize`] before use.
    pub fn new(api: ApiClient<T, S>, renderer: R) -> Self {
        Self {
            api,
            renderer,
            state: RefCell::new(AuthState::LoggedOut(LoginForm::default())),
        }
    }

    /// Current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn set_state(&self, state: AuthState) {
        *self.state.borrow_mut() = state;
        self.renderer.render(&self.state.borrow());
    }

    /// Re-derive the state from the token store.
    ///
    /// A store that cannot be read counts as having no token.
    pub fn initialize(&self) -> AuthState {
        let token = self.api.tokens().load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read session token");
            None
        });
        let state = if token.is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut(LoginForm::default())
        };
        tracing::debug!(logged_in = state.is_logged_in(), "auth state initialized");
        self.set_state(state.clone());
        state
    }

    /// Submit credentials.
    ///
    /// On success the token is stored and the controller re-initializes into
    /// [`AuthState::LoggedIn`]. On failure the form shows the error, the
    /// submit control is re-enabled and nothing is stored.
    pub async fn login(&self, username: &str, password: &str) -> AuthState {
        self.set_state(AuthState::LoggedOut(LoginForm {
            submitting: true,
            message: None,
        }));

        match self.try_login(username, password).await {
            Ok(()) => {
                tracing::info!(username = username.trim(), "signed in");
                self.initialize()
            }
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                let state = AuthState::LoggedOut(LoginForm {
                    submitting: false,
                    message: Some(err.to_string()),
                });
                self.set_state(state.clone());
                state
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Credentials::new(username, password)?;
        let response = self.api.login(&credentials).await?;
        self.api.tokens().save(&response.access_token)?;
        Ok(())
    }

    /// Drop the stored token and re-initialize into [`AuthState::LoggedOut`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the token could not be removed. The
    /// state is left untouched since the session is still there.
    pub fn logout(&self) -> Result<AuthState, ApiError> {
        if let Err(err) = self.api.tokens().clear() {
            tracing::error!(error = %err, "failed to clear session token");
            return Err(err.into());
        }
        tracing::info!("signed out");
        Ok(self.initialize())
    }
}
