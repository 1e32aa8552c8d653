use axum::{routing::get, Json, Router};

use crate::api::middleware::session::AppState;
use crate::models::event::{self, Event};

/// Upcoming competitions and workshops. Fixed sample content for now;
/// events are not persisted and have no registration flow.
async fn list_events() -> Json<Vec<Event>> {
    Json(event::sample_events())
}

/// Creates the events router
pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}
