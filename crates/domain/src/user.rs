//! User: the identity behind the current session.

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: String,
}
