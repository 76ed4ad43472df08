//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod http;
pub mod render;
pub mod token_store;

pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use render::{AuthRenderer, DashboardRenderer};
pub use token_store::TokenStore;
