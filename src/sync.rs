//! Initial pose synchronization: move the follower onto the leader's pose
//! with a slow profile before full-rate mirroring starts.

use tracing::warn;

use crate::{
    bus::ServoBus, clock::Clock, config::TeleopConfig, error::TeleopError, model::JointPositions,
};

/// True when no joint id present in both readings differs by more than
/// `tolerance` encoder units. A single joint over the line blocks it.
pub fn within_tolerance(current: &JointPositions, target: &JointPositions, tolerance: f64) -> bool {
    current
        .iter()
        .filter_map(|(id, pos)| target.get(id).map(|goal| (pos - goal).abs()))
        .all(|diff| diff <= tolerance)
}

/// Calibrate the follower, command it to the leader's current pose with the
/// configured approach profile, then poll until it converges or the timeout
/// elapses. A timeout is a soft failure: teleoperation proceeds regardless.
///
/// Returns the leader pose that was used as the target.
pub fn synchronize<L, F, C>(
    leader: &mut L,
    follower: &mut F,
    cfg: &TeleopConfig,
    clock: &C,
) -> Result<JointPositions, TeleopError>
where
    L: ServoBus,
    F: ServoBus,
    C: Clock,
{
    follower.joint_limit_calibration()?;

    println!("Moving follower to match leader's initial position");
    let target = leader.read_positions()?;
    follower.write_positions(&target, Some(cfg.approach_profile))?;

    let deadline = clock.now() + cfg.sync_timeout;
    loop {
        if clock.now() > deadline {
            warn!("follower did not reach the leader's initial position in time");
            println!(
                "Warning: Timed out waiting for follower to match leader's initial position."
            );
            break;
        }

        let current = follower.read_positions()?;
        if within_tolerance(&current, &target, cfg.sync_tolerance) {
            println!("Follower is synchronized with leader.");
            break;
        }
    }

    Ok(target)
}
