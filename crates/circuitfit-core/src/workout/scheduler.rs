//! Tick sources for a running workout.
//!
//! The controller only counts; something outside must call `tick()` once
//! per period while a countdown runs. A `Scheduler` is that something.
//! At most one schedule is armed at a time, and cancelling is idempotent.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

pub trait Scheduler {
    /// Begin (or keep) delivering ticks. Arming twice keeps one schedule.
    fn arm(&mut self);
    /// Stop delivering ticks. No-op when not armed.
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn arm(&mut self) {
        (**self).arm()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }
}

/// Scheduler whose ticks are delivered by the caller.
///
/// Used by tests and by front-ends that own their own clock.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    armed: bool,
    arms: u32,
    cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times the schedule went from idle to armed.
    pub fn arm_count(&self) -> u32 {
        self.arms
    }

    /// Times an armed schedule was cancelled.
    pub fn cancel_count(&self) -> u32 {
        self.cancels
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.arms += 1;
        }
    }

    fn cancel(&mut self) {
        if self.armed {
            self.armed = false;
            self.cancels += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Tokio-backed periodic scheduler.
///
/// The first tick fires one full period after arming. Late ticks are
/// delayed rather than bursted. Arming only records the deadline, so it
/// works outside a runtime; the timer itself is created by `next_tick`.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    first_tick: Option<Instant>,
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            first_tick: None,
            interval: None,
        }
    }

    /// Wait for the next tick. Returns `false` immediately when not armed.
    ///
    /// Must be awaited inside a tokio runtime with the time driver enabled.
    pub async fn next_tick(&mut self) -> bool {
        let Some(first_tick) = self.first_tick else {
            return false;
        };
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
        true
    }
}

impl Scheduler for IntervalScheduler {
    fn arm(&mut self) {
        if self.first_tick.is_none() {
            self.first_tick = Some(Instant::now() + self.period);
        }
    }

    fn cancel(&mut self) {
        self.first_tick = None;
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.first_tick.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_arm_is_idempotent() {
        let mut s = ManualScheduler::new();
        s.arm();
        s.arm();
        assert!(s.is_armed());
        assert_eq!(s.arm_count(), 1);
        s.cancel();
        s.cancel();
        assert!(!s.is_armed());
        assert_eq!(s.cancel_count(), 1);
    }

    #[test]
    fn interval_arms_outside_a_runtime() {
        let mut s = IntervalScheduler::new(Duration::from_secs(1));
        s.arm();
        assert!(s.is_armed());
        s.cancel();
        assert!(!s.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_after_one_period() {
        let mut s = IntervalScheduler::new(Duration::from_secs(1));
        let start = Instant::now();
        s.arm();
        assert!(s.next_tick().await);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert!(s.next_tick().await);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_interval_does_not_tick() {
        let mut s = IntervalScheduler::new(Duration::from_secs(1));
        s.arm();
        s.cancel();
        assert!(!s.is_armed());
        assert!(!s.next_tick().await);
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_keeps_single_schedule() {
        let mut s = IntervalScheduler::new(Duration::from_secs(1));
        let start = Instant::now();
        s.arm();
        tokio::time::advance(Duration::from_millis(500)).await;
        s.arm();
        assert!(s.next_tick().await);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }
}
