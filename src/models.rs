use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// One of the five canonical daily prayers, in day order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    // Fajr wraps back to Isha
    pub fn previous(self) -> PrayerName {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw label -> "HH:MM" mapping, as the timings provider returns it.
/// Extra labels (Sunrise, Imsak, Midnight, ...) are allowed and ignored.
pub type Timings = BTreeMap<String, String>;

/// Result of prayer-window resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrayerWindow {
    pub current: PrayerName,
    pub next_name: PrayerName,
    pub next_time: String, // original "HH:MM", not reformatted
}

// ---- Al Adhan `data` payload (only the fields the prayer page reads) ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayTimings {
    pub timings: Timings,
    pub date: DayDate,
    pub meta: DayMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayDate {
    pub readable: String, // "18 Oct 2026"
    pub hijri: HijriDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HijriDate {
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HijriMonth {
    pub en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayMeta {
    pub timezone: String, // IANA, e.g. "Africa/Cairo"
}

impl HijriDate {
    pub fn display(&self) -> String {
        format!("{} {} {}", self.day, self.month.en, self.year)
    }
}

impl DayMeta {
    /// City part of the timezone, e.g. "America/New_York" -> "New York".
    pub fn location(&self) -> String {
        let city = self.timezone.split('/').nth(1).unwrap_or(self.timezone.as_str());
        city.replace('_', " ")
    }
}
