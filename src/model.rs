use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MotorId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoModel {
    Sts3215,
    Scs0009,
}

/// Role of one arm in the teleoperation pair. Assigned once from the voltage
/// classification and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Leader,
    Follower,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Leader => write!(f, "Leader"),
            Role::Follower => write!(f, "Follower"),
        }
    }
}

/// Snapshot of servo positions keyed by bus id, in raw encoder units.
/// Produced fresh on every read.
pub type JointPositions = BTreeMap<MotorId, f64>;

/// Speed/acceleration attached to a position write, in raw device units.
/// `None` at the call site means device default: full speed, no ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    pub speed: u16,
    pub acceleration: u8,
}
