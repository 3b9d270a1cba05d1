use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::PrayerName;

/// Why a timetable could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrayerError {
    #[error("missing timing for {}", join_names(.0))]
    MissingTiming(Vec<PrayerName>),

    #[error("malformed time {value:?} for {name}, expected HH:MM")]
    MalformedTime { name: PrayerName, value: String },
}

fn join_names(names: &[PrayerName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Prayer(#[from] PrayerError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no timetable stored yet")]
    NotFound,

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Prayer(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Io(e) => {
                error!("storage failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
