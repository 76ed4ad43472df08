//! # metricboard-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HttpTransport`: send one HTTP request, return status and body
//!   - `TokenStore`: load, save and clear the session token
//!   - `AuthRenderer` / `DashboardRenderer`: receive view state after every change
//! - Provide the **API client** that speaks the backend contract over a transport
//! - Provide the **controllers** driving the two views:
//!   - `AuthController`: login/logout state machine
//!   - `DashboardController`: summary, filters, table and pagination
//! - Build the **view models** renderers display
//!
//! ## Dependency rule
//! Depends on `metricboard-domain` only (plus `futures` for joining requests).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//! Ports are not `Send`: the browser is single-threaded and the terminal
//! client runs on a current-thread runtime.

pub mod api_client;
pub mod config;
pub mod controllers;
pub mod ports;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
