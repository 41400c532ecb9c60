//! Session-related types.
//!
//! Types backing the simulated login gate.

use secrecy::SecretString;
use serde::Deserialize;

/// Credentials typed into the login form.
///
/// The password is never checked or stored; it is only held long enough to
/// satisfy the form.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    /// Username shown back to the user once "logged in".
    pub username: String,
    /// Ignored password.
    pub password: SecretString,
}

/// Local storage keys for session data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const AUTHENTICATED_USER: &str = "authenticatedUser";
}
