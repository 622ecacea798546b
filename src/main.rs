use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Result;
use sts_scs_teleop::{
    find_servo_ports, pick_two, resolve_roles, run_teleop, synchronize, FeetechBus, SystemClock,
    TeleopConfig, TeleopError,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let cfg = TeleopConfig::default();

    let (port1, port2) = match find_servo_ports().and_then(pick_two) {
        Ok(pair) => pair,
        Err(TeleopError::PortDiscovery { found }) => {
            println!("Error: Need 2 servo ports but found {}", found.len());
            if !found.is_empty() {
                println!("Available ports: {}", found.join(", "));
            }
            return Ok(());
        }
        Err(e) => {
            println!("Error finding servo ports: {e}");
            return Ok(());
        }
    };

    println!("Found ports: {port1}, {port2}");

    // Both buses are opened before any control logic runs; dropping them on
    // any exit path disables torque and releases the port.
    let bus1 = FeetechBus::open(
        &port1,
        cfg.leader_model,
        &cfg.servo_ids,
        cfg.baudrate,
        cfg.serial_timeout,
    )?;
    let bus2 = FeetechBus::open(
        &port2,
        cfg.follower_model,
        &cfg.servo_ids,
        cfg.baudrate,
        cfg.serial_timeout,
    )?;

    let (mut leader, mut follower) = resolve_roles(&cfg, bus1, bus2, &port1, &port2)?;

    let clock = SystemClock;
    synchronize(&mut leader, &mut follower, &cfg, &clock)?;

    println!(
        "\nTeleoperation started at {}Hz. Ctrl+C to stop.",
        cfg.frequency_hz
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    run_teleop(&mut leader, &mut follower, &cfg, &cancel, &clock)?;

    println!("\nStopped.");
    Ok(())
}
