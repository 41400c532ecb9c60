//! Simulated session user.
//!
//! There is no real authentication behind this record: it is fabricated on
//! login from whatever username was typed. It must never be treated as a
//! security boundary.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Email attached to every fabricated user.
pub const PLACEHOLDER_EMAIL: &str = "demo@example.com";

/// The locally stored "logged in" user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl SessionUser {
    /// Fabricate a user record for a username.
    #[must_use]
    pub fn simulated(username: &str) -> Self {
        Self {
            id: UserId::new(1),
            username: username.to_string(),
            email: PLACEHOLDER_EMAIL.to_string(),
        }
    }
}
