// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

/// A cancellable fixed-period schedule driven by the caller's clock.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    /// First tick is due one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: Some(start + period),
        }
    }

    /// `None` once cancelled.
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    pub fn is_cancelled(&self) -> bool {
        self.next.is_none()
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    /// Returns true and reschedules when a tick is due at `now`.
    ///
    /// A late caller gets one tick, not a backlog: the next deadline moves
    /// past `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(Duration::from_millis(100), t0);
        assert!(!iv.poll(t0));
        assert!(!iv.poll(t0 + Duration::from_millis(99)));
        assert!(iv.poll(t0 + Duration::from_millis(100)));
        assert!(!iv.poll(t0 + Duration::from_millis(150)));
        assert!(iv.poll(t0 + Duration::from_millis(205)));
        assert_eq!(iv.deadline(), Some(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn late_poll_does_not_pile_up() {
        let t0 = Instant::now();
        let mut iv = Interval::new(Duration::from_millis(100), t0);
        let late = t0 + Duration::from_millis(1050);
        assert!(iv.poll(late));
        assert!(!iv.poll(late));
        assert_eq!(iv.deadline(), Some(late + Duration::from_millis(100)));
    }

    #[test]
    fn cancelled_interval_never_fires() {
        let t0 = Instant::now();
        let mut iv = Interval::new(Duration::from_millis(10), t0);
        iv.cancel();
        assert!(iv.is_cancelled());
        assert!(!iv.poll(t0 + Duration::from_secs(5)));
        assert_eq!(iv.deadline(), None);
    }
}
