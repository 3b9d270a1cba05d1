// --------------------------------------------------
// Handles API endpoints for the stored day timetable.
//
// Responsibilities:
// - Accept a day's timings (Al Adhan `data` payload)
// - Return the stored timetable
// --------------------------------------------------

use std::{io, path::Path, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::error::AppError;
use crate::logic::PrayerSchedule;
use crate::models::DayTimings;
use crate::state::AppState;
use crate::store;

// Load the stored timetable, NotFound when nothing was submitted yet
pub fn load_stored(path: &Path) -> Result<DayTimings, AppError> {
    store::load_timings(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        _ => AppError::Io(e),
    })
}

// -----------------------------
// GET /api/timings
// Returns the stored timetable
// -----------------------------
pub async fn get_timings(State(state): State<Arc<AppState>>) -> Result<Json<DayTimings>, AppError> {
    let day = load_stored(&state.config.data_path)?;
    Ok(Json(day))
}

// -----------------------------
// PUT /api/timings
// Validates and replaces the stored timetable
// -----------------------------
pub async fn put_timings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DayTimings>, JsonRejection>,
) -> Result<Json<DayTimings>, AppError> {
    let Json(day) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // all five prayers present and well formed; the anchor day is irrelevant here
    let now = state.clock.now();
    PrayerSchedule::from_timings(&day.timings, now.date_naive(), *now.offset())?;

    store::save_timings(&state.config.data_path, &day)?;
    info!(
        "stored timetable for {} ({})",
        day.date.readable, day.meta.timezone
    );

    Ok(Json(day))
}
