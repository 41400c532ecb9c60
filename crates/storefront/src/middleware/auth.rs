//! Login gate extractor.
//!
//! Store routes only make sense once the simulated login has happened.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tokio::sync::OwnedMutexGuard;

use shopfront_core::SessionUser;

use crate::controller::StoreController;
use crate::state::AppState;

/// Extractor that requires a logged-in session user.
///
/// The controller lock taken for the check is handed to the handler, so a
/// concurrent logout cannot land between the check and the event. If nobody
/// is logged in, the request is redirected to the page root, which renders
/// the login form.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(session: RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", session.user.username)
/// }
/// ```
pub struct RequireUser {
    /// The logged-in user.
    pub user: SessionUser,
    /// The locked controller, held until the handler returns.
    pub controller: OwnedMutexGuard<StoreController>,
}

/// Rejection returned when no user is logged in.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let controller = state.lock_controller().await;
        let user = controller.user().cloned().ok_or(AuthRejection)?;
        Ok(Self { user, controller })
    }
}
