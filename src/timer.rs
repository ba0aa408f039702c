//! Redraw timer
//!
//! Interactive mode redraws once a second, aligned to the wall-clock second
//! boundary. The timer is a single pending deadline the engine task selects
//! on rather than a running loop, so clearing it is also its cancellation:
//! a stopped timer schedules nothing and a stale wakeup finds no deadline.

use embassy_time::{Duration, Instant};

/// Interactive update rate.
pub const UPDATE_RATE_MS: u64 = 1_000;

/// Delay until the next second boundary, from the current sub-second offset.
pub fn align_delay_ms(subsec_ms: u32) -> u64 {
    UPDATE_RATE_MS - u64::from(subsec_ms) % UPDATE_RATE_MS
}

#[derive(Default)]
pub struct RedrawTimer {
    deadline: Option<Instant>,
}

impl RedrawTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule an immediate fire. Any previously pending deadline is
    /// replaced, so at most one wakeup is ever outstanding.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Handle an expired deadline: re-arm on the next second boundary while
    /// the face still wants periodic redraws, otherwise go idle.
    pub fn realign(&mut self, now: Instant, subsec_ms: u32, keep_running: bool) {
        self.deadline = if keep_running {
            Some(now + Duration::from_millis(align_delay_ms(subsec_ms)))
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_reaches_next_second_boundary() {
        assert_eq!(align_delay_ms(0), 1_000);
        assert_eq!(align_delay_ms(1), 999);
        assert_eq!(align_delay_ms(250), 750);
        assert_eq!(align_delay_ms(999), 1);
    }

    #[test]
    fn restart_keeps_a_single_deadline() {
        let mut timer = RedrawTimer::new();
        let now = Instant::now();

        timer.restart(now);
        timer.restart(now + Duration::from_millis(5));
        assert_eq!(timer.deadline(), Some(now + Duration::from_millis(5)));
    }

    #[test]
    fn realign_schedules_on_the_boundary() {
        let mut timer = RedrawTimer::new();
        let now = Instant::now();

        timer.realign(now, 400, true);
        assert_eq!(timer.deadline(), Some(now + Duration::from_millis(600)));
    }

    #[test]
    fn realign_stops_when_not_running() {
        let mut timer = RedrawTimer::new();
        timer.restart(Instant::now());

        timer.realign(Instant::now(), 400, false);
        assert!(!timer.is_pending());
    }

    #[test]
    fn stop_clears_the_deadline() {
        let mut timer = RedrawTimer::new();
        timer.restart(Instant::now());
        timer.stop();
        timer.stop();
        assert!(!timer.is_pending());
    }
}
