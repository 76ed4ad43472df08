//! In-memory fakes for the ports, shared by the unit tests of this crate.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use metricboard_domain::error::{StorageError, TransportError};
use metricboard_domain::session::SessionToken;
use serde_json::{Value, json};

use crate::controllers::auth::AuthState;
use crate::controllers::dashboard::DashboardState;
use crate::ports::{
    AuthRenderer, DashboardRenderer, HttpRequest, HttpResponse, HttpTransport, Method, TokenStore,
};

pub const BASE_URL: &str = "http://api.test";

#[derive(Clone)]
struct Reply {
    result: Result<HttpResponse, TransportError>,
    yields: usize,
}

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<Reply>,
}

#[derive(Default)]
struct Inner {
    routes: Vec<Route>,
    requests: Vec<HttpRequest>,
}

/// Scripted transport. Replies registered for the same route are served in
/// order; the last one repeats. Unknown routes answer 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<RefCell<Inner>>,
}

fn path_of(url: &str) -> &str {
    let path = url.strip_prefix(BASE_URL).unwrap_or(url);
    path.split('?').next().unwrap_or(path)
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        let mut inner = self.inner.borrow_mut();
        if let Some(route) = inner
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.replies.push_back(reply);
        } else {
            inner.routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.on_text(method, path, status, &body.to_string());
    }

    pub fn on_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.on_delayed_text(method, path, status, body, 0);
    }

    /// Like [`FakeTransport::on`], but the reply only resolves after
    /// yielding to the runtime `yields` times.
    pub fn on_delayed(&self, method: Method, path: &str, status: u16, body: Value, yields: usize) {
        self.on_delayed_text(method, path, status, &body.to_string(), yields);
    }

    fn on_delayed_text(&self, method: Method, path: &str, status: u16, body: &str, yields: usize) {
        let response = HttpResponse {
            status,
            body: body.to_string(),
        };
        self.push(
            method,
            path,
            Reply {
                result: Ok(response),
                yields,
            },
        );
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(
            method,
            path,
            Reply {
                result: Err(TransportError::new(message)),
                yields: 0,
            },
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| path_of(&r.url) == path)
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        let reply = {
            let mut inner = self.inner.borrow_mut();
            let path = path_of(&request.url).to_string();
            let method = request.method;
            inner.requests.push(request);
            inner
                .routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
                .and_then(|route| {
                    if route.replies.len() > 1 {
                        route.replies.pop_front()
                    } else {
                        route.replies.front().cloned()
                    }
                })
                .unwrap_or_else(|| Reply {
                    result: Ok(HttpResponse {
                        status: 404,
                        body: json!({"detail": "Not Found"}).to_string(),
                    }),
                    yields: 0,
                })
        };
        async move {
            for _ in 0..reply.yields {
                tokio::task::yield_now().await;
            }
            reply.result
        }
    }
}

/// Token store backed by a shared cell.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<SessionToken>>>,
    locked: Rc<Cell<bool>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = SessionToken::parse(token);
        store
    }

    /// Make `clear` fail from now on.
    pub fn lock(&self) {
        self.locked.set(true);
    }

    pub fn current(&self) -> Option<String> {
        self.token.borrow().as_ref().map(|t| t.as_str().to_string())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        Ok(self.token.borrow().clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.locked.get() {
            return Err(StorageError::Unavailable);
        }
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingAuthRenderer {
    states: Rc<RefCell<Vec<AuthState>>>,
}

impl RecordingAuthRenderer {
    pub fn states(&self) -> Vec<AuthState> {
        self.states.borrow().clone()
    }

    pub fn last(&self) -> Option<AuthState> {
        self.states.borrow().last().cloned()
    }
}

impl AuthRenderer for RecordingAuthRenderer {
    fn render(&self, state: &AuthState) {
        self.states.borrow_mut().push(state.clone());
    }
}

#[derive(Clone, Default)]
pub struct RecordingDashboardRenderer {
    states: Rc<RefCell<Vec<DashboardState>>>,
    login_shown: Rc<Cell<usize>>,
}

impl RecordingDashboardRenderer {
    pub fn states(&self) -> Vec<DashboardState> {
        self.states.borrow().clone()
    }

    pub fn login_shown(&self) -> usize {
        self.login_shown.get()
    }
}

impl DashboardRenderer for RecordingDashboardRenderer {
    fn render(&self, state: &DashboardState) {
        self.states.borrow_mut().push(state.clone());
    }

    fn show_login(&self) {
        self.login_shown.set(self.login_shown.get() + 1);
    }
}

/// A `/metrics/summary` body with two dates and 12345 records.
pub fn summary_json(can_see_cost: bool) -> Value {
    json!({
        "total_records": 12345,
        "available_dates": ["2024-08-16", "2024-08-17"],
        "user_permissions": {
            "role": if can_see_cost { "admin" } else { "user" },
            "can_see_cost_micros": can_see_cost
        },
        "sortable_columns": ["date", "campaign_id", "impressions"]
    })
}

/// A `/metrics` body with `rows` identical records.
pub fn page_json(current_page: u32, total_pages: u32, rows: usize) -> Value {
    let data: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "date": "2024-08-16",
                "campaign_id": format!("c-{i}"),
                "impressions": 12345,
                "cost_micros": 2_500_000
            })
        })
        .collect();
    json!({
        "data": data,
        "columns_visible": ["date", "campaign_id", "impressions", "cost_micros"],
        "total_records": rows,
        "pagination": {"current_page": current_page, "total_pages": total_pages}
    })
}
