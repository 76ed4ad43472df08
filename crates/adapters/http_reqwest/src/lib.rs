//! # metricboard-adapter-http-reqwest
//!
//! Native HTTP transport using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `HttpTransport` port defined in `metricboard-app::ports::http`
//! - Own the connection pool and request timeout
//! - Map reqwest failures to the domain `TransportError`
//!
//! ## Dependency rule
//! Depends on `metricboard-app` (for port traits) and `metricboard-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod transport;

pub use transport::ReqwestTransport;
