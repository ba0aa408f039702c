//! Time keeping
//!
//! Wall-clock time plus a timezone offset. The offset follows the host zone
//! while the face is visible and tracks timezone-changed broadcasts.

use chrono::{Duration, Local, NaiveDateTime, Offset, Utc};

/// Shift a UTC timestamp into a local zone.
pub fn localize(utc: NaiveDateTime, offset_secs: i32) -> NaiveDateTime {
    utc + Duration::seconds(i64::from(offset_secs))
}

pub struct Clock {
    offset_secs: i32,
}

impl Clock {
    /// Clock in the host system's timezone.
    pub fn system() -> Self {
        Self {
            offset_secs: system_offset_secs(),
        }
    }

    pub fn with_offset(offset_secs: i32) -> Self {
        Self { offset_secs }
    }

    /// Current local time.
    pub fn now(&self) -> NaiveDateTime {
        localize(Utc::now().naive_utc(), self.offset_secs)
    }

    pub fn offset_secs(&self) -> i32 {
        self.offset_secs
    }

    /// Apply a timezone-changed broadcast.
    pub fn set_offset(&mut self, offset_secs: i32) {
        if self.offset_secs != offset_secs {
            log::info!("timezone offset now {}s", offset_secs);
        }
        self.offset_secs = offset_secs;
    }

    /// Re-read the host timezone, in case it changed while we were not
    /// watching.
    pub fn sync_system_timezone(&mut self) {
        self.set_offset(system_offset_secs());
    }
}

fn system_offset_secs() -> i32 {
    Local::now().offset().fix().local_minus_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn utc_noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn positive_offset_moves_clock_forward() {
        let local = localize(utc_noon(), 3_600);
        assert_eq!(local.hour(), 13);
    }

    #[test]
    fn negative_offset_moves_clock_back() {
        let local = localize(utc_noon(), -5 * 3_600);
        assert_eq!(local.hour(), 7);
    }

    #[test]
    fn offset_change_shifts_now() {
        let mut clock = Clock::with_offset(0);
        let utc = clock.now();
        clock.set_offset(3_600);
        let shifted = clock.now();

        let delta = shifted - utc;
        assert!(delta >= Duration::seconds(3_599) && delta <= Duration::seconds(3_601));
    }
}
