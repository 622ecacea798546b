//! Voltage-based leader/follower identification.
//!
//! The operator-driven arm runs off ~5 V, the motor-driven arm off ~12 V, so
//! a single voltage sample tells the two apart without any operator input.

use crate::{bus::ServoBus, config::TeleopConfig, error::TeleopError, model::Role};

/// Role of the first handle given its sampled voltage. The second handle
/// always gets the opposite role.
pub fn classify(voltage1: f64, threshold: f64) -> (Role, Role) {
    if voltage1 < threshold {
        (Role::Leader, Role::Follower)
    } else {
        (Role::Follower, Role::Leader)
    }
}

/// Classify the two freshly opened buses and return them as
/// `(leader, follower)`, reporting the assignment to the operator.
///
/// The first bus is sampled at `servo_ids[0]` and the second at
/// `servo_ids[1]`. Only the first bus's voltage drives the decision; the
/// second sample is taken for the report.
pub fn resolve_roles<B: ServoBus>(
    cfg: &TeleopConfig,
    mut bus1: B,
    mut bus2: B,
    port1: &str,
    port2: &str,
) -> Result<(B, B), TeleopError> {
    if cfg.servo_ids.len() < 2 {
        return Err(TeleopError::Config(
            "voltage classification needs at least two servo ids".to_string(),
        ));
    }

    let voltage1 = bus1.read_voltage(cfg.servo_ids[0])?;
    let voltage2 = bus2.read_voltage(cfg.servo_ids[1])?;

    let (role1, role2) = classify(voltage1, cfg.voltage_threshold);
    println!("{port1}: {role1} (voltage: {voltage1:.1}V)");
    println!("{port2}: {role2} (voltage: {voltage2:.1}V)");

    match role1 {
        Role::Leader => Ok((bus1, bus2)),
        Role::Follower => Ok((bus2, bus1)),
    }
}
