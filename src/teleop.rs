//! Fixed-rate mirroring of leader joint positions onto the follower.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::{bus::ServoBus, clock::Clock, config::TeleopConfig, error::TeleopError};

/// Time left until the next iteration is due, or `None` when this one ran for
/// the whole period or longer. Overruns are not paid back: the loop simply
/// drops below the target rate.
pub fn remaining_sleep(period: Duration, elapsed: Duration) -> Option<Duration> {
    if elapsed < period {
        Some(period - elapsed)
    } else {
        None
    }
}

/// Copy leader positions onto the follower at the configured frequency until
/// `cancel` is raised. The flag is only checked at iteration boundaries; a
/// read or write failure mid-iteration propagates as a hard error.
pub fn run_teleop<L, F, C>(
    leader: &mut L,
    follower: &mut F,
    cfg: &TeleopConfig,
    cancel: &AtomicBool,
    clock: &C,
) -> Result<(), TeleopError>
where
    L: ServoBus,
    F: ServoBus,
    C: Clock,
{
    let period = cfg.period();

    while !cancel.load(Ordering::SeqCst) {
        let start = clock.now();

        let positions = leader.read_positions()?;
        follower.write_positions(&positions, None)?;

        let elapsed = clock.now().saturating_duration_since(start);
        if let Some(rest) = remaining_sleep(period, elapsed) {
            clock.sleep(rest);
        }
    }

    Ok(())
}
