use std::time::{Duration, Instant};

/// Identifies one scheduled repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn from_raw(id: u64) -> Self {
        TimerHandle(id)
    }
}

/// Drives the periodic tick of a session.
pub trait Ticker {
    /// Starts a repeating timer with the given period.
    fn schedule(&mut self, period: Duration) -> TimerHandle;

    /// Stops the timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    next_due: Instant,
}

/// A single repeating interval read off the monotonic clock.
///
/// The event loop asks it how long it may block for input and then polls it;
/// scheduling again replaces whatever interval was running.
#[derive(Debug, Default)]
pub struct IntervalTicker {
    next_id: u64,
    active: Option<Interval>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule_at(&mut self, period: Duration, now: Instant) -> TimerHandle {
        let handle = TimerHandle::from_raw(self.next_id);
        self.next_id += 1;
        self.active = Some(Interval {
            handle,
            period,
            next_due: now + period,
        });
        handle
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Time left before the next firing, or `None` when nothing is scheduled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|interval| interval.next_due.saturating_duration_since(now))
    }

    /// Returns the handle if its interval has elapsed and re-arms it.
    ///
    /// Missed periods are not replayed: a late poll fires once and the next
    /// firing is one full period after `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TimerHandle> {
        let interval = self.active.as_mut()?;
        if now < interval.next_due {
            return None;
        }
        interval.next_due = now + interval.period;
        Some(interval.handle)
    }
}

impl Ticker for IntervalTicker {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        self.schedule_at(period, Instant::now())
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self
            .active
            .as_ref()
            .is_some_and(|interval| interval.handle == handle)
        {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_after_period() {
        let mut ticker = IntervalTicker::new();
        let start = Instant::now();
        let handle = ticker.schedule_at(PERIOD, start);

        assert_eq!(ticker.poll(start), None);
        assert_eq!(ticker.poll(start + Duration::from_millis(99)), None);
        assert_eq!(ticker.poll(start + PERIOD), Some(handle));
        // Re-armed for the following period.
        assert_eq!(ticker.poll(start + PERIOD), None);
        assert_eq!(ticker.poll(start + 2 * PERIOD), Some(handle));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let mut ticker = IntervalTicker::new();
        let start = Instant::now();
        ticker.schedule_at(PERIOD, start);

        let late = start + 5 * PERIOD;
        assert!(ticker.poll(late).is_some());
        assert!(ticker.poll(late).is_none());
        assert_eq!(ticker.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn test_time_until_due() {
        let mut ticker = IntervalTicker::new();
        let start = Instant::now();
        assert_eq!(ticker.time_until_due(start), None);

        ticker.schedule_at(PERIOD, start);
        assert_eq!(
            ticker.time_until_due(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            ticker.time_until_due(start + 2 * PERIOD),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_cancel() {
        let mut ticker = IntervalTicker::new();
        let start = Instant::now();
        let handle = ticker.schedule_at(PERIOD, start);

        ticker.cancel(handle);

        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(start + PERIOD), None);
    }

    #[test]
    fn test_reschedule_replaces_and_ignores_stale_cancel() {
        let mut ticker = IntervalTicker::new();
        let start = Instant::now();
        let first = ticker.schedule_at(PERIOD, start);
        let second = ticker.schedule_at(PERIOD, start);
        assert_ne!(first, second);

        ticker.cancel(first);

        assert!(ticker.is_active());
        assert_eq!(ticker.poll(start + PERIOD), Some(second));
    }
}
