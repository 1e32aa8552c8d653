use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::api::middleware::auth::{current_profile_id, get_authenticated_profile};
use crate::api::middleware::session::AppState;
use crate::error::Result;
use crate::models::Registration;
use crate::services::enrollment::{self, ToggleResult};
use crate::services::roster::{self, ScheduledClass};

/// Full weekly schedule: every class in (day, start time) order with its
/// resolved roster.
async fn list_classes(State(state): State<AppState>) -> Result<Json<Vec<ScheduledClass>>> {
    let classes = roster::list_classes(&state.pool).await?;

    Ok(Json(classes))
}

/// Training ids the current identity is registered for. Anonymous
/// callers get an empty list, not an error.
async fn my_registrations(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Uuid>>> {
    let Some(profile_id) = current_profile_id(&session).await? else {
        return Ok(Json(Vec::new()));
    };

    let ids = Registration::training_ids_for_profile(&state.pool, profile_id).await?;

    Ok(Json(ids))
}

/// Toggles the caller's registration for a class, subject to the
/// capacity ceiling. Requires a signed-in member.
async fn toggle_registration(
    State(state): State<AppState>,
    Path(training_id): Path<Uuid>,
    session: Session,
) -> Result<Json<ToggleResult>> {
    let profile = get_authenticated_profile(&session, &state.pool).await?;

    let result = enrollment::toggle_registration(&state.pool, training_id, profile.id).await?;

    Ok(Json(result))
}

/// Creates the schedule router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(list_classes))
        .route("/schedule/registrations", get(my_registrations))
        .route("/schedule/:id/toggle", post(toggle_registration))
}
