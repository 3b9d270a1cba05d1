use chrono::{DateTime, FixedOffset, Local};

/// Source of "now" for anything that needs the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time, pinned to the system's current UTC offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let local = Local::now();
        let offset = *local.offset();
        local.with_timezone(&offset)
    }
}

/// Always returns the same instant. Used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let at = DateTime::parse_from_rfc3339("2026-10-18T13:45:00+03:00").unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_keeps_local_offset() {
        let now = SystemClock.now();
        assert_eq!(
            now.offset().local_minus_utc(),
            Local::now().offset().local_minus_utc()
        );
    }
}
