//! Fixed-timestep accumulator
//!
//! Wall-clock time is banked every frame and spent in whole steps, so the
//! update callback always sees the same `step` no matter how fast or slow
//! the loop is running.

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    now: f64,
    last: f64,
    accumulated: f64,
}

impl FixedTimestep {
    /// `step` is in seconds and must be positive. `start` is the clock
    /// reading the first frame is measured from.
    pub fn new(step: f64, start: f64) -> Self {
        debug_assert!(step > 0.0, "timestep must be positive");
        Self {
            step,
            now: start,
            last: start,
            accumulated: 0.0,
        }
    }

    /// Step size for `rate` updates per second (a rate of 0 is treated as 1)
    pub fn from_rate(rate: u32, start: f64) -> Self {
        Self::new(1.0 / rate.max(1) as f64, start)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Bank the time elapsed since the previous call and run `update` once
    /// per whole step. Returns how many times `update` ran.
    ///
    /// A clock reading earlier than the last one banks nothing.
    pub fn advance<F: FnMut(f64)>(&mut self, now: f64, mut update: F) -> u32 {
        self.now = now;
        self.accumulated += (self.now - self.last).max(0.0);
        self.last = self.now;

        let mut ticks = 0;
        while self.accumulated >= self.step {
            update(self.step);
            self.accumulated -= self.step;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 1.0 / 300.0;

    #[test]
    fn test_no_time_no_ticks() {
        let mut ts = FixedTimestep::new(STEP, 5.0);
        assert_eq!(ts.advance(5.0, |_| panic!("should not tick")), 0);
        assert_eq!(ts.accumulated(), 0.0);
    }

    #[test]
    fn test_ticks_follow_total_elapsed() {
        let mut ts = FixedTimestep::new(STEP, 0.0);
        // Cumulative totals land well away from step boundaries
        let deltas = [2.4, 0.3, 5.1, 0.05, 10.0, 0.6, 31.25];

        let mut now = 0.0;
        let mut total_ticks = 0u32;
        let mut total_steps = 0.0;
        for delta in deltas {
            now += delta * STEP;
            total_steps += delta;
            total_ticks += ts.advance(now, |dt| assert_eq!(dt, STEP));

            assert_eq!(total_ticks, total_steps.floor() as u32);
            assert!(ts.accumulated() >= 0.0);
            assert!(ts.accumulated() < STEP);
        }
    }

    #[test]
    fn test_catches_up_after_stall() {
        let mut ts = FixedTimestep::new(0.1, 0.0);
        let mut calls = Vec::new();
        let ticks = ts.advance(0.55, |dt| calls.push(dt));
        assert_eq!(ticks, 5);
        assert_eq!(calls, vec![0.1; 5]);
        assert!(ts.accumulated() < 0.1);
    }

    #[test]
    fn test_clock_going_backwards_banks_nothing() {
        let mut ts = FixedTimestep::new(0.1, 1.0);
        ts.advance(1.05, |_| {});
        let before = ts.accumulated();
        assert_eq!(ts.advance(0.5, |_| {}), 0);
        assert_eq!(ts.accumulated(), before);
        assert!(ts.accumulated() >= 0.0);
    }

    #[test]
    fn test_from_rate() {
        let ts = FixedTimestep::from_rate(300, 0.0);
        assert!((ts.step() - STEP).abs() < 1e-12);
        assert_eq!(FixedTimestep::from_rate(0, 0.0).step(), 1.0);
    }
}
