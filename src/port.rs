use crate::error::TeleopError;

/// Candidate servo ports on this machine, sorted by name. Enumeration itself
/// is delegated to the serialport crate; this only filters out devices that
/// cannot be a USB servo adapter.
pub fn find_servo_ports() -> Result<Vec<String>, TeleopError> {
    let ports = serialport::available_ports().map_err(|_| TeleopError::Communication)?;

    let mut names: Vec<String> = ports
        .into_iter()
        .map(|p| p.port_name)
        .filter(|name| is_servo_port(name))
        .collect();
    names.sort();

    Ok(names)
}

/// Exactly two ports for the leader/follower pair, or a discovery error
/// reporting what was actually found.
pub fn pick_two(ports: Vec<String>) -> Result<(String, String), TeleopError> {
    let mut ports = ports.into_iter();
    match (ports.next(), ports.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        (first, _) => Err(TeleopError::PortDiscovery {
            found: first.into_iter().collect(),
        }),
    }
}

#[cfg(target_os = "linux")]
fn is_servo_port(name: &str) -> bool {
    name.contains("ttyUSB") || name.contains("ttyACM")
}

#[cfg(target_os = "macos")]
fn is_servo_port(name: &str) -> bool {
    name.contains("usbmodem") || name.contains("usbserial")
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn is_servo_port(name: &str) -> bool {
    name.contains("COM")
}
