use std::time::{Duration, Instant};

/// Default refresh cadence in frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Fixed-cadence frame scheduler.
///
/// Deadlines accumulate additively (`next = next + period`) so the cadence
/// does not drift with per-frame jitter. A late frame leaves the next
/// deadline in the past, which makes the following frame due immediately.
/// Missed ticks are not replayed.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next_tick: Instant,
    frame_index: u64,
}

impl FramePacer {
    /// Creates a pacer at `hz` frames per second whose first frame is due now.
    ///
    /// `hz == 0` is treated as 1.
    pub fn new(hz: u32) -> Self {
        Self::starting_at(Instant::now(), Self::period_for(hz))
    }

    /// Creates a pacer with an explicit first deadline and period.
    pub fn starting_at(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next_tick: start,
            frame_index: 0,
        }
    }

    #[inline]
    pub fn period_for(hz: u32) -> Duration {
        Duration::from_secs(1) / hz.max(1)
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Instant at which the next frame should start.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next_tick
    }

    /// Number of frames started so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Marks a frame as started and moves the deadline one period forward.
    pub fn advance(&mut self) {
        self.next_tick += self.period;
        self.frame_index = self.frame_index.wrapping_add(1);
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacer() -> (Instant, FramePacer) {
        let t0 = Instant::now();
        (t0, FramePacer::starting_at(t0, Duration::from_millis(16)))
    }

    #[test]
    fn first_frame_is_due_immediately() {
        let (t0, p) = pacer();
        assert!(p.is_due(t0));
        assert_eq!(p.deadline(), t0);
    }

    #[test]
    fn deadline_advances_by_exactly_one_period() {
        let (t0, mut p) = pacer();
        p.advance();
        assert_eq!(p.deadline(), t0 + Duration::from_millis(16));
        assert!(!p.is_due(t0 + Duration::from_millis(15)));
        assert!(p.is_due(t0 + Duration::from_millis(16)));
    }

    #[test]
    fn lateness_does_not_shift_the_schedule() {
        let (t0, mut p) = pacer();
        p.advance();
        // The frame started 5 ms late; the next deadline is still t0 + 2 periods.
        let late = t0 + Duration::from_millis(21);
        assert!(p.is_due(late));
        p.advance();
        assert_eq!(p.deadline(), t0 + Duration::from_millis(32));
    }

    #[test]
    fn overrun_frame_is_due_immediately_without_catch_up() {
        let (t0, mut p) = pacer();
        p.advance();
        // A 100 ms stall spans several periods; only one frame is due.
        let now = t0 + Duration::from_millis(100);
        assert!(p.is_due(now));
        p.advance();
        assert_eq!(p.frame_index(), 2);
        assert_eq!(p.deadline(), t0 + Duration::from_millis(32));
    }

    #[test]
    fn zero_rate_is_clamped() {
        assert_eq!(FramePacer::period_for(0), Duration::from_secs(1));
        assert_eq!(FramePacer::new(60).period(), Duration::from_secs(1) / 60);
    }
}
