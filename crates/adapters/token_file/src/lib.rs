//! # metricboard-adapter-token-file
//!
//! Session token persistence in a single file on disk.
//!
//! ## Responsibilities
//! - Implement the `TokenStore` port defined in `metricboard-app::ports::token_store`
//! - Create the parent directory on first save
//! - Restrict the file to its owner on Unix
//!
//! ## Dependency rule
//! Depends on `metricboard-app` (for port traits) and `metricboard-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod store;

pub use store::FileTokenStore;
