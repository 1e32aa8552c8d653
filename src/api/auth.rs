use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use uuid::Uuid;

use crate::api::middleware::session::{AppState, SESSION_KEY_PROFILE_ID};
use crate::models::{
    account::{Account, CreateAccountData},
    profile::{Belt, CreateProfileData, Profile},
};
use crate::services::password;

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    ProfileMissing,
    ValidationError(String),
    DatabaseError(sqlx::Error),
    SessionError(String),
    HashError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::ProfileMissing => (
                StatusCode::NOT_FOUND,
                "Could not find user profile. Please try again.".to_string(),
            ),
            AuthError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::DatabaseError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            AuthError::SessionError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Session error: {}", msg),
            ),
            AuthError::HashError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Password hashing error: {}", msg),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    email: String,
    password: String,
    name: String,
    belt: String,
    admin_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignInRequest {
    email: String,
    password: String,
}

/// Creates the account and its profile in one transaction: a failed
/// profile insert rolls the account back, so an orphaned account is
/// unreachable.
async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<Profile>), AuthError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::ValidationError(
            "A valid email address is required".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err(AuthError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AuthError::ValidationError("Name is required".to_string()));
    }
    let belt = Belt::parse(&req.belt)
        .ok_or_else(|| AuthError::ValidationError(format!("Unknown belt: {}", req.belt)))?;

    // Only the exact enrollment code grants admin; absent or wrong codes
    // silently produce a regular profile.
    let is_admin = req.admin_code.as_deref()
        == Some(state.config.admin_enrollment_code.expose_secret().as_str());

    let password_hash =
        password::hash_password(&req.password).map_err(|e| AuthError::HashError(e.to_string()))?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(AuthError::DatabaseError)?;

    let account = Account::create(
        &mut *tx,
        CreateAccountData {
            email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            AuthError::ValidationError("An account with this email already exists".to_string())
        } else {
            AuthError::DatabaseError(e)
        }
    })?;

    let profile = Profile::create(
        &mut *tx,
        CreateProfileData {
            account_id: account.id,
            name: req.name.trim().to_string(),
            belt,
            is_admin,
        },
    )
    .await
    .map_err(AuthError::DatabaseError)?;

    tx.commit().await.map_err(AuthError::DatabaseError)?;

    // Identity is adopted only after both rows are committed
    session
        .insert(SESSION_KEY_PROFILE_ID, profile.id)
        .await
        .map_err(|e| AuthError::SessionError(e.to_string()))?;

    tracing::info!(profile_id = %profile.id, is_admin, "Member signed up");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Authenticates credentials, then loads the profile. A valid account
/// without a profile row is rejected without establishing a session.
async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<SignInRequest>,
) -> Result<Json<Profile>, AuthError> {
    let email = req.email.trim().to_lowercase();

    let account = Account::find_by_email(&state.pool, &email)
        .await
        .map_err(AuthError::DatabaseError)?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(&req.password, &account.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let profile = Profile::find_by_id(&state.pool, account.id)
        .await
        .map_err(AuthError::DatabaseError)?
        .ok_or_else(|| {
            tracing::error!(account_id = %account.id, "Authenticated account has no profile row");
            AuthError::ProfileMissing
        })?;

    session
        .insert(SESSION_KEY_PROFILE_ID, profile.id)
        .await
        .map_err(|e| AuthError::SessionError(e.to_string()))?;

    tracing::info!(profile_id = %profile.id, "Member signed in");

    Ok(Json(profile))
}

/// Logs out the member. If the store cannot invalidate the session the
/// error is surfaced and the session is left intact for a retry.
async fn sign_out(session: Session) -> Result<StatusCode, AuthError> {
    session
        .flush()
        .await
        .map_err(|e| AuthError::SessionError(e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Session introspection: returns the current profile, or null for
/// anonymous callers. The profile row is re-fetched on every call; the
/// session holds only the id, never a cached copy.
async fn current_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>, AuthError> {
    let profile_id: Option<Uuid> = session
        .get(SESSION_KEY_PROFILE_ID)
        .await
        .map_err(|e| AuthError::SessionError(e.to_string()))?;

    let Some(profile_id) = profile_id else {
        return Ok(Json(json!({ "profile": null })));
    };

    match Profile::find_by_id(&state.pool, profile_id).await {
        Ok(Some(profile)) => Ok(Json(json!({ "profile": profile }))),
        Ok(None) => {
            // Stale session pointing at a deleted profile; drop it and
            // report the caller as anonymous.
            tracing::warn!(%profile_id, "Session references a missing profile");
            let _ = session.flush().await;
            Ok(Json(json!({ "profile": null })))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load profile for session");
            Ok(Json(json!({ "profile": null })))
        }
    }
}

/// Creates the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/logout", post(sign_out))
        .route("/auth/me", get(current_session))
}
