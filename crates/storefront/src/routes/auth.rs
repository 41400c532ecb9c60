//! Simulated login route handlers.
//!
//! Logging in fabricates a user record from the typed username and stores it
//! in local storage. This is a placeholder, not authentication.

use axum::{Form, extract::State, response::Redirect};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::models::LoginCredentials;
use crate::state::AppState;

/// Log in with whatever credentials were typed.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the username or password is blank, or
/// `AppError::Storage` if the user cannot be persisted.
#[instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Redirect> {
    if credentials.username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".to_string()));
    }
    if credentials.password.expose_secret().is_empty() {
        return Err(AppError::BadRequest("password is required".to_string()));
    }

    let mut controller = state.controller().lock().await;
    let user = controller.login(&credentials)?;
    set_sentry_user(&user.id, &user.username);

    Ok(Redirect::to("/"))
}

/// Log out and return to the login gate.
///
/// # Errors
///
/// Returns `AppError::Storage` if the stored user cannot be removed.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect> {
    let mut controller = state.controller().lock().await;
    controller.logout()?;
    clear_sentry_user();

    Ok(Redirect::to("/"))
}
