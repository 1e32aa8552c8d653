use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::api::middleware::auth::require_admin;
use crate::api::middleware::session::AppState;
use crate::error::{AppError, Result};
use crate::models::Training;
use crate::services::training_form::{self, TrainingForm};

/// All trainings in schedule order, for the admin table
async fn list_trainings(State(state): State<AppState>) -> Result<Json<Vec<Training>>> {
    let trainings = Training::list_all(&state.pool).await?;

    Ok(Json(trainings))
}

/// Creates a class. Fields are validated before any row is written;
/// violations come back per field and nothing hits the database.
async fn create_training(
    State(state): State<AppState>,
    Json(form): Json<TrainingForm>,
) -> Result<(StatusCode, Json<Training>)> {
    let data = training_form::validate(&form).map_err(AppError::FieldValidation)?;

    let training = Training::create(&state.pool, data).await?;

    tracing::info!(training_id = %training.id, title = %training.title, "Class created");

    Ok((StatusCode::CREATED, Json(training)))
}

/// Updates every editable field of a class, with the same local
/// validation as create.
async fn update_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<TrainingForm>,
) -> Result<Json<Training>> {
    let data = training_form::validate(&form).map_err(AppError::FieldValidation)?;

    let training = Training::update(&state.pool, id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    tracing::info!(training_id = %training.id, "Class updated");

    Ok(Json(training))
}

/// Deletes a class and its registrations atomically. The confirm/cancel
/// step lives in the client; by the time this fires the admin has
/// confirmed.
async fn delete_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = Training::delete_cascading(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Class not found".to_string()));
    }

    tracing::info!(training_id = %id, "Class deleted with its registrations");

    Ok(StatusCode::NO_CONTENT)
}

/// Creates the admin router. Every route requires an admin profile.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/trainings",
            get(list_trainings).post(create_training),
        )
        .route(
            "/admin/trainings/:id",
            put(update_training).delete(delete_training),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
