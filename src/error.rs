use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Authentication,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed for one or more fields")]
    FieldValidation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Class is already at capacity")]
    CapacityExceeded,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_debug = format!("{:?}", self);

        let (status, body) = match self {
            AppError::Authentication => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Authentication required. Please sign in." }),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "message": "You need admin privileges to access this section." }),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::FieldValidation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "errors": errors }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::CapacityExceeded => (
                StatusCode::CONFLICT,
                json!({ "message": "This class is full." }),
            ),
            AppError::Session(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": format!("Session error: {}", msg) }),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Database error" }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };

        let mut body = body;
        body["error"] = json!(error_debug);

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
