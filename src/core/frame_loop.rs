//=========================================================================
// Frame Loop
//=========================================================================
//
// Fixed-period callback scheduling, driven by the event loop.
//
// Lifecycle:
//   set_rate(n) → start(cb, now) → [is_due → take_callback → cb → finish_tick
//                                   → advance] ... → stop()
//
// Deadlines advance one period from the previous deadline. A loop that has
// fallen behind runs its next tick immediately but never replays the
// ticks it missed.
//
// The driver never sleeps; the platform waits until `deadline()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::MomoError;

//=== FrameLoop ===========================================================

/// Schedules a callback `F` at a fixed frame rate.
pub struct FrameLoop<F> {
    rate: Option<u32>,
    period: Duration,
    next_deadline: Option<Instant>,
    callback: Option<F>,
    running: bool,
    ticks: u64,
}

impl<F> FrameLoop<F> {
    //--- Construction -----------------------------------------------------

    /// Creates a stopped loop with no rate set.
    pub fn new() -> Self {
        Self {
            rate: None,
            period: Duration::ZERO,
            next_deadline: None,
            callback: None,
            running: false,
            ticks: 0,
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Sets frames per second. Takes effect on the next `start`.
    pub fn set_rate(&mut self, rate: u32) -> Result<(), MomoError> {
        if rate == 0 {
            return Err(MomoError::InvalidFrameRate(rate));
        }
        self.rate = Some(rate);
        debug!(target: "momo::frame_loop", "Frame rate set to {}", rate);
        Ok(())
    }

    pub fn rate(&self) -> Option<u32> {
        self.rate
    }

    /// Period in effect for the running loop.
    pub fn period(&self) -> Duration {
        self.period
    }

    //--- Control ----------------------------------------------------------

    /// Starts ticking `callback`, first due one period after `now`.
    ///
    /// Starting a running loop replaces its callback.
    pub fn start(&mut self, callback: F, now: Instant) -> Result<(), MomoError> {
        let rate = self.rate.ok_or(MomoError::FrameRateUnset)?;

        self.period = period_for(rate);
        self.next_deadline = Some(now + self.period);
        self.callback = Some(callback);
        self.running = true;

        info!(
            target: "momo::frame_loop",
            "Frame loop started at {} fps ({:?} per frame)",
            rate,
            self.period
        );
        Ok(())
    }

    /// Cancels the loop and drops its callback.
    pub fn stop(&mut self) {
        if self.running {
            info!(target: "momo::frame_loop", "Frame loop stopped after {} ticks", self.ticks);
        }
        self.running = false;
        self.callback = None;
        self.next_deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    //--- Ticking ----------------------------------------------------------

    pub fn is_due(&self, now: Instant) -> bool {
        self.running && self.next_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Removes the callback for the duration of a tick.
    pub fn take_callback(&mut self) -> Option<F> {
        self.callback.take()
    }

    /// Returns the callback after a tick.
    ///
    /// Dropped if the loop was stopped or restarted with a new callback
    /// while it ran.
    pub fn finish_tick(&mut self, callback: F) {
        self.ticks += 1;
        if self.running && self.callback.is_none() {
            self.callback = Some(callback);
        }
    }

    /// Schedules the next deadline after a tick at `now`.
    pub fn advance(&mut self, now: Instant) {
        let Some(deadline) = self.next_deadline else {
            return;
        };

        let mut next = deadline + self.period;
        if next <= now {
            trace!(
                target: "momo::frame_loop",
                "Behind by {:?}, skipping missed frames",
                now - deadline
            );
            next = now;
        }
        self.next_deadline = Some(next);
    }

    //--- Queries ----------------------------------------------------------

    /// When the next tick is due, if running.
    pub fn deadline(&self) -> Option<Instant> {
        if self.running {
            self.next_deadline
        } else {
            None
        }
    }

    /// Ticks completed since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

impl<F> Default for FrameLoop<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn period_for(rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    type Loop = FrameLoop<&'static str>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn sixty_fps_period() {
        let mut fl = Loop::new();
        fl.set_rate(60).unwrap();
        fl.start("cb", Instant::now()).unwrap();

        let micros = fl.period().as_micros();
        assert!((16_666..=16_667).contains(&micros), "period was {}us", micros);
    }

    #[test]
    fn zero_rate_rejected() {
        let mut fl = Loop::new();
        assert!(matches!(fl.set_rate(0), Err(MomoError::InvalidFrameRate(0))));
        assert_eq!(fl.rate(), None);
    }

    #[test]
    fn start_without_rate_fails() {
        let mut fl = Loop::new();
        assert!(matches!(fl.start("cb", Instant::now()), Err(MomoError::FrameRateUnset)));
        assert!(!fl.is_running());
    }

    #[test]
    fn first_tick_due_after_one_period() {
        let mut fl = Loop::new();
        fl.set_rate(10).unwrap();
        let t0 = Instant::now();
        fl.start("cb", t0).unwrap();

        assert!(!fl.is_due(t0));
        assert!(!fl.is_due(t0 + ms(99)));
        assert!(fl.is_due(t0 + ms(100)));
    }

    #[test]
    fn deadlines_advance_from_previous_deadline() {
        let mut fl = Loop::new();
        fl.set_rate(10).unwrap();
        let t0 = Instant::now();
        fl.start("cb", t0).unwrap();

        // Tick runs a little late; the schedule does not drift.
        fl.advance(t0 + ms(105));
        assert_eq!(fl.deadline(), Some(t0 + ms(200)));
    }

    #[test]
    fn falling_behind_does_not_burst() {
        let mut fl = Loop::new();
        fl.set_rate(10).unwrap();
        let t0 = Instant::now();
        fl.start("cb", t0).unwrap();

        let late = t0 + ms(550);
        fl.advance(late);

        assert_eq!(fl.deadline(), Some(late));
        fl.advance(late);
        assert_eq!(fl.deadline(), Some(late + ms(100)));
    }

    #[test]
    fn callback_round_trips_through_tick() {
        let mut fl = Loop::new();
        fl.set_rate(30).unwrap();
        fl.start("cb", Instant::now()).unwrap();

        let cb = fl.take_callback().unwrap();
        fl.finish_tick(cb);

        assert_eq!(fl.take_callback(), Some("cb"));
        assert_eq!(fl.tick_count(), 1);
    }

    #[test]
    fn stop_during_tick_drops_callback() {
        let mut fl = Loop::new();
        fl.set_rate(30).unwrap();
        fl.start("cb", Instant::now()).unwrap();

        let cb = fl.take_callback().unwrap();
        fl.stop();
        fl.finish_tick(cb);

        assert_eq!(fl.take_callback(), None);
        assert_eq!(fl.deadline(), None);
    }

    #[test]
    fn restart_during_tick_keeps_new_callback() {
        let mut fl = Loop::new();
        fl.set_rate(30).unwrap();
        let now = Instant::now();
        fl.start("old", now).unwrap();

        let cb = fl.take_callback().unwrap();
        fl.start("new", now).unwrap();
        fl.finish_tick(cb);

        assert_eq!(fl.take_callback(), Some("new"));
    }

    #[test]
    fn rate_change_applies_on_restart() {
        let mut fl = Loop::new();
        fl.set_rate(10).unwrap();
        fl.start("cb", Instant::now()).unwrap();
        fl.set_rate(20).unwrap();

        assert_eq!(fl.period(), ms(100));
        fl.start("cb", Instant::now()).unwrap();
        assert_eq!(fl.period(), ms(50));
    }
}
