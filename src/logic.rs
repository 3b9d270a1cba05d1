/*
Prayer window resolution.
Module is kept independent from HTTP / Axum so it can be tested on its own
*/


use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::clock::Clock;
use crate::error::PrayerError;
use crate::models::{PrayerName, PrayerWindow, Timings};


// One prayer placed on a concrete day
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub name: PrayerName,
    pub time: String,               // original "HH:MM" as supplied
    pub at: DateTime<FixedOffset>,  // that time on the anchored day
}

// The five daily prayers anchored to one calendar day.
//     always exactly five entries, in PrayerName::ALL order
#[derive(Debug, Clone)]
pub struct PrayerSchedule {
    entries: Vec<ScheduleEntry>,
}

impl PrayerSchedule {
    /// Pick the five prayers out of `timings` and place them on `date`.
    ///
    /// Every missing prayer is reported at once. Labels other than the
    /// five prayers are ignored.
    pub fn from_timings(
        timings: &Timings,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<Self, PrayerError> {
        let missing: Vec<PrayerName> = PrayerName::ALL
            .into_iter()
            .filter(|p| !timings.contains_key(p.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(PrayerError::MissingTiming(missing));
        }

        let mut entries = Vec::with_capacity(PrayerName::ALL.len());
        for name in PrayerName::ALL {
            let time = &timings[name.as_str()];
            let at = parse_hhmm_on(date, time, offset).ok_or_else(|| {
                PrayerError::MalformedTime {
                    name,
                    value: time.clone(),
                }
            })?;
            entries.push(ScheduleEntry {
                name,
                time: time.clone(),
                at,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn entry(&self, name: PrayerName) -> &ScheduleEntry {
        &self.entries[name.index()]
    }

    /// Which prayer is in effect at `now` and which comes next.
    ///
    /// Next is the first prayer strictly after `now`; past Isha it wraps to
    /// Fajr. Current is always the prayer before next in cyclic order, so a
    /// prayer whose time equals `now` is already current.
    pub fn resolve(&self, now: DateTime<FixedOffset>) -> PrayerWindow {
        let next = self
            .entries
            .iter()
            .find(|e| e.at > now)
            .unwrap_or(&self.entries[0]);

        PrayerWindow {
            current: next.name.previous(),
            next_name: next.name,
            next_time: next.time.clone(),
        }
    }
}


// Parse a strict "HH:MM" string into a DateTime on the given date.
//     hour: 1-2 digits (0..23), minute: exactly 2 digits (00..59)
fn parse_hhmm_on(
    date: NaiveDate,
    hhmm: &str,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let parts: Vec<&str> = hhmm.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let (h, m) = (parts[0], parts[1]);
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let time = NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0)?;
    offset.from_local_datetime(&date.and_time(time)).single()
}


/// Resolve the current and next prayer for `now`.
///
/// The five times are anchored to `now`'s calendar date and UTC offset;
/// only the time of day of `now` matters.
pub fn resolve_prayer_window(
    timings: &Timings,
    now: DateTime<FixedOffset>,
) -> Result<PrayerWindow, PrayerError> {
    let schedule = PrayerSchedule::from_timings(timings, now.date_naive(), *now.offset())?;
    Ok(schedule.resolve(now))
}

// Same as resolve_prayer_window, reading `now` from the clock once
pub fn resolve_with_clock(timings: &Timings, clock: &dyn Clock) -> Result<PrayerWindow, PrayerError> {
    resolve_prayer_window(timings, clock.now())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::PrayerName::*;

    fn timings() -> Timings {
        [
            ("Fajr", "05:00"),
            ("Dhuhr", "12:00"),
            ("Asr", "15:30"),
            ("Maghrib", "18:20"),
            ("Isha", "19:45"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        at_hms(h, m, 0)
    }

    fn at_hms(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let naive = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        offset.from_local_datetime(&naive).unwrap()
    }

    fn window(current: PrayerName, next: PrayerName, time: &str) -> PrayerWindow {
        PrayerWindow {
            current,
            next_name: next,
            next_time: time.to_string(),
        }
    }

    #[test]
    fn before_fajr_is_still_isha() {
        let w = resolve_prayer_window(&timings(), at(2, 0)).unwrap();
        assert_eq!(w, window(Isha, Fajr, "05:00"));
    }

    #[test]
    fn after_isha_wraps_to_fajr() {
        let w = resolve_prayer_window(&timings(), at(23, 0)).unwrap();
        assert_eq!(w, window(Isha, Fajr, "05:00"));
    }

    #[test]
    fn exactly_at_prayer_time_makes_it_current() {
        let w = resolve_prayer_window(&timings(), at(18, 20)).unwrap();
        assert_eq!(w, window(Maghrib, Isha, "19:45"));

        let w = resolve_prayer_window(&timings(), at(5, 0)).unwrap();
        assert_eq!(w, window(Fajr, Dhuhr, "12:00"));

        let w = resolve_prayer_window(&timings(), at(19, 45)).unwrap();
        assert_eq!(w, window(Isha, Fajr, "05:00"));
    }

    #[test]
    fn one_second_before_boundary_is_previous_prayer() {
        let w = resolve_prayer_window(&timings(), at_hms(18, 19, 59)).unwrap();
        assert_eq!(w, window(Asr, Maghrib, "18:20"));
    }

    #[test]
    fn between_consecutive_prayers() {
        let t = timings();
        let cases = [
            (at(8, 30), Fajr, Dhuhr, "12:00"),
            (at(13, 0), Dhuhr, Asr, "15:30"),
            (at(17, 0), Asr, Maghrib, "18:20"),
            (at(19, 0), Maghrib, Isha, "19:45"),
        ];
        for (now, current, next, time) in cases {
            assert_eq!(
                resolve_prayer_window(&t, now).unwrap(),
                window(current, next, time),
                "now = {now}"
            );
        }
    }

    #[test]
    fn next_time_is_returned_verbatim() {
        let mut t = timings();
        t.insert("Dhuhr".to_string(), "9:05".to_string());
        let w = resolve_prayer_window(&t, at(6, 0)).unwrap();
        assert_eq!(w, window(Fajr, Dhuhr, "9:05"));
    }

    #[test]
    fn extra_labels_are_ignored() {
        let mut t = timings();
        t.insert("Sunrise".to_string(), "06:20".to_string());
        t.insert("Midnight".to_string(), "not a time".to_string());
        let w = resolve_prayer_window(&t, at(6, 30)).unwrap();
        assert_eq!(w, window(Fajr, Dhuhr, "12:00"));
    }

    #[test]
    fn same_inputs_same_result() {
        let t = timings();
        let now = at(14, 10);
        assert_eq!(
            resolve_prayer_window(&t, now).unwrap(),
            resolve_prayer_window(&t, now).unwrap()
        );
    }

    #[test]
    fn out_of_order_schedule_follows_scan_rule() {
        let mut t = timings();
        t.insert("Dhuhr".to_string(), "04:00".to_string());
        // Fajr (05:00) is the first entry after 04:30
        let w = resolve_prayer_window(&t, at(4, 30)).unwrap();
        assert_eq!(w, window(Isha, Fajr, "05:00"));
        // nothing before Asr is after 06:00, Asr is
        let w = resolve_prayer_window(&t, at(6, 0)).unwrap();
        assert_eq!(w, window(Dhuhr, Asr, "15:30"));
    }

    #[test]
    fn missing_isha_is_an_error() {
        let mut t = timings();
        t.remove("Isha");
        let err = resolve_prayer_window(&t, at(12, 0)).unwrap_err();
        assert_eq!(err, PrayerError::MissingTiming(vec![Isha]));
    }

    #[test]
    fn all_missing_names_reported_in_day_order() {
        let mut t = timings();
        t.remove("Maghrib");
        t.remove("Fajr");
        let err = resolve_prayer_window(&t, at(12, 0)).unwrap_err();
        assert_eq!(err, PrayerError::MissingTiming(vec![Fajr, Maghrib]));
    }

    #[test]
    fn malformed_times_are_rejected() {
        for bad in ["", "12", "12:5", "24:00", "12:60", "12:00:00", "ab:cd", "+1:00", " 5:00", "05:00 (EET)"] {
            let mut t = timings();
            t.insert("Asr".to_string(), bad.to_string());
            let err = resolve_prayer_window(&t, at(12, 0)).unwrap_err();
            assert_eq!(
                err,
                PrayerError::MalformedTime { name: Asr, value: bad.to_string() },
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn schedule_is_anchored_to_now_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = at(13, 0).with_timezone(&offset); // 05:00 at -05:00
        let w = resolve_prayer_window(&timings(), now).unwrap();
        assert_eq!(w, window(Fajr, Dhuhr, "12:00"));
    }

    #[test]
    fn schedule_entries_keep_day_order() {
        let s = PrayerSchedule::from_timings(&timings(), at(0, 0).date_naive(), *at(0, 0).offset())
            .unwrap();
        let names: Vec<PrayerName> = s.entries().iter().map(|e| e.name).collect();
        assert_eq!(names, PrayerName::ALL.to_vec());
        assert_eq!(s.entry(Asr).time, "15:30");
        assert_eq!(s.entry(Asr).at, at(15, 30));
    }

    #[test]
    fn clock_is_read_for_now() {
        let clock = FixedClock(at(16, 0));
        let w = resolve_with_clock(&timings(), &clock).unwrap();
        assert_eq!(w, window(Asr, Maghrib, "18:20"));
    }
}
