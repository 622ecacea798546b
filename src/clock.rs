use std::time::{Duration, Instant};

/// Wall-clock source for loop pacing and timeouts. The synchronizer and the
/// teleoperation loop only touch time through this, so tests can script it.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
