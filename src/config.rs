use std::time::Duration;

use crate::model::{MotionProfile, MotorId, ServoModel};

/// Static configuration for one teleoperation session. Built once at startup
/// and passed by reference into each phase; nothing here changes at runtime.
///
/// `servo_ids` must contain at least two ids: the resolver samples voltage
/// from `servo_ids[0]` on the first port and `servo_ids[1]` on the second.
#[derive(Debug, Clone)]
pub struct TeleopConfig {
    pub servo_ids: Vec<MotorId>,
    pub leader_model: ServoModel,
    pub follower_model: ServoModel,
    /// Volts. Below this the arm is the operator-driven leader (~5 V supply);
    /// at or above it the arm is the motor-driven follower (~12 V supply).
    pub voltage_threshold: f64,
    pub frequency_hz: f64,
    /// Max per-joint difference, in encoder units, for the follower to count
    /// as synchronized with the leader.
    pub sync_tolerance: f64,
    pub sync_timeout: Duration,
    /// Slow profile for the follower's initial move onto the leader's pose.
    pub approach_profile: MotionProfile,
    pub baudrate: u32,
    pub serial_timeout: Duration,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            servo_ids: (1..=7).map(MotorId).collect(),
            leader_model: ServoModel::Sts3215,
            follower_model: ServoModel::Sts3215,
            voltage_threshold: 9.0,
            frequency_hz: 200.0,
            sync_tolerance: 20.0,
            sync_timeout: Duration::from_secs(5),
            approach_profile: MotionProfile {
                speed: 100,
                acceleration: 10,
            },
            baudrate: 1_000_000,
            serial_timeout: Duration::from_millis(20),
        }
    }
}

impl TeleopConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frequency_hz)
    }
}
