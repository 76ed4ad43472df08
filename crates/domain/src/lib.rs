//! # metricboard-domain
//!
//! Pure domain model for the metricboard dashboard client.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **session** (bearer token, credentials, token response)
//! - Define the **user** identity returned by the backend
//! - Define **metrics** payloads (summary, page, pagination, records)
//! - Define the **filter state** driven by user interaction
//! - Number and currency **formatting** per locale
//! - Contain the pagination invariant (`1 <= current_page <= total_pages`)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod filter;
pub mod format;
pub mod metrics;
pub mod session;
pub mod user;
