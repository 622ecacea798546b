//! Recenter every servo on one bus so its current pose reads as 2048.
//!
//! Hold the arm in its middle pose before running; the calibration takes
//! effect immediately.

use anyhow::Result;
use sts_scs_teleop::{find_servo_ports, FeetechBus, ServoBus, TeleopConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let cfg = TeleopConfig::default();

    let ports = find_servo_ports()?;
    let Some(port) = ports.first() else {
        println!("Error: no servo port found");
        return Ok(());
    };

    println!("Setting middle position on {port}...");

    let mut bus = FeetechBus::open(
        port,
        cfg.leader_model,
        &cfg.servo_ids,
        cfg.baudrate,
        cfg.serial_timeout,
    )?;
    bus.calibrate_middle_position()?;

    println!("All servos calibrated to 2048.");
    Ok(())
}
