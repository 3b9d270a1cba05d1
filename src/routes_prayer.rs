use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::logic::{self, PrayerSchedule};
use crate::models::{PrayerName, PrayerWindow, Timings};
use crate::routes_timings::load_stored;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveInput {
    pub timings: Timings,
    pub now: Option<String>, // RFC3339, service clock when absent
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub now: String,
    pub current: PrayerName,
    pub current_time: String,
    pub next_name: PrayerName,
    pub next_time: String,
    pub schedule: Vec<ScheduleItemResponse>,
    pub date: String,
    pub hijri: String,
    pub location: String,
    pub stale: bool, // stored day is not `now`'s date
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemResponse {
    pub name: PrayerName,
    pub time: String,
    pub is_active: bool,
}

// -----------------------------
// POST /api/prayer/resolve
// Resolves the given timings against `now` (or the service clock)
// -----------------------------
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResolveInput>, JsonRejection>,
) -> Result<Json<PrayerWindow>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let window = match input.now.as_deref() {
        Some(raw) => {
            let now = DateTime::parse_from_rfc3339(raw)
                .map_err(|_| AppError::BadRequest(format!("invalid now: {raw:?}")))?;
            logic::resolve_prayer_window(&input.timings, now)?
        }
        None => logic::resolve_with_clock(&input.timings, state.clock.as_ref())?,
    };

    debug!("resolved: current {}, next {} at {}", window.current, window.next_name, window.next_time);
    Ok(Json(window))
}

// -----------------------------
// GET /api/prayer/status
// Live status of the stored timetable
// -----------------------------
pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, AppError> {
    let day = load_stored(&state.config.data_path)?;
    let now = state.clock.now();

    let schedule = PrayerSchedule::from_timings(&day.timings, now.date_naive(), *now.offset())?;
    let window = schedule.resolve(now);

    let stale = is_stale(&day.date.readable, now.date_naive());
    if stale {
        warn!(
            "stored timetable is for {}, resolving against {}",
            day.date.readable,
            now.date_naive()
        );
    }

    let items = schedule
        .entries()
        .iter()
        .map(|e| ScheduleItemResponse {
            name: e.name,
            time: e.time.clone(),
            is_active: e.name == window.current,
        })
        .collect();

    Ok(Json(StatusResponse {
        now: now.to_rfc3339(),
        current: window.current,
        current_time: schedule.entry(window.current).time.clone(),
        next_name: window.next_name,
        next_time: window.next_time,
        schedule: items,
        date: day.date.readable.clone(),
        hijri: day.date.hijri.display(),
        location: day.meta.location(),
        stale,
    }))
}

// Al Adhan's `readable` date is "DD Mon YYYY". An unreadable date is not
// treated as stale.
fn is_stale(readable: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(readable, "%d %b %Y") {
        Ok(day) => day != today,
        Err(e) => {
            debug!("cannot read stored date {readable:?}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_fresh() {
        assert!(!is_stale("18 Oct 2026", day(2026, 10, 18)));
        assert!(!is_stale("01 Jan 2027", day(2027, 1, 1)));
    }

    #[test]
    fn other_day_is_stale() {
        assert!(is_stale("17 Oct 2026", day(2026, 10, 18)));
        assert!(is_stale("18 Oct 2025", day(2026, 10, 18)));
    }

    #[test]
    fn unreadable_date_is_not_stale() {
        assert!(!is_stale("yesterday", day(2026, 10, 18)));
    }
}
