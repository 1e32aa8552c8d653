use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use super::session::{AppState, SESSION_KEY_PROFILE_ID};
use crate::error::{AppError, Result};
use crate::models::Profile;

/// Profile id recorded in the session, if any
pub async fn current_profile_id(session: &Session) -> Result<Option<Uuid>> {
    session
        .get(SESSION_KEY_PROFILE_ID)
        .await
        .map_err(|e| AppError::Session(e.to_string()))
}

/// Loads the profile behind the current session. Fails with an
/// authentication error for anonymous callers, and for sessions whose
/// profile row no longer exists.
pub async fn get_authenticated_profile(session: &Session, pool: &PgPool) -> Result<Profile> {
    let profile_id = current_profile_id(session)
        .await?
        .ok_or(AppError::Authentication)?;

    Profile::find_by_id(pool, profile_id)
        .await?
        .ok_or(AppError::Authentication)
}

/// Middleware that requires the caller to hold an admin profile
pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response> {
    let profile = get_authenticated_profile(&session, &state.pool).await?;

    if !profile.is_admin {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
