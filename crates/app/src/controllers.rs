//! Controllers: own the view state and drive it from user actions.
//!
//! Controllers take `&self` and keep their state in a `RefCell`; a borrow is
//! never held across an `.await`. After every state change the controller
//! hands the state to its renderer by reference.

pub mod auth;
pub mod dashboard;

pub use auth::{AuthController, AuthState, LoginForm};
pub use dashboard::{DashboardController, DashboardState, DashboardStatus};
