use std::time::Duration;

use rustypot::servo::feetech::{scs0009::Scs0009Controller, sts3215::Sts3215Controller};
use tracing::warn;

use crate::{
    bus::ServoBus,
    error::TeleopError,
    model::{JointPositions, MotionProfile, MotorId, ServoModel},
};

/// Raw reading that the middle-position calibration recenters onto.
const MIDDLE_POSITION: f64 = 2048.0;

enum FeetechControl {
    Sts3215(Sts3215Controller),
    Scs0009(Scs0009Controller),
}

/// One serial bus of Feetech servos, driven through rustypot. Owns the port
/// exclusively; torque is disabled and the port closed when the value drops,
/// whichever way the surrounding phase exits.
pub struct FeetechBus {
    control: FeetechControl,
    ids: Vec<u8>,
}

impl FeetechBus {
    pub fn open(
        serial_port: &str,
        model: ServoModel,
        servo_ids: &[MotorId],
        baudrate: u32,
        timeout: Duration,
    ) -> Result<Self, TeleopError> {
        let io = serialport::new(serial_port, baudrate)
            .timeout(timeout)
            .open()
            .map_err(|_| TeleopError::Communication)?;

        let control = match model {
            ServoModel::Sts3215 => FeetechControl::Sts3215(
                Sts3215Controller::new()
                    .with_protocol_v1()
                    .with_serial_port(io),
            ),
            ServoModel::Scs0009 => FeetechControl::Scs0009(
                Scs0009Controller::new()
                    .with_protocol_v1()
                    .with_serial_port(io),
            ),
        };

        Ok(Self {
            control,
            ids: servo_ids.iter().map(|id| id.0).collect(),
        })
    }

    fn write_profile(&mut self, profile: MotionProfile) -> Result<(), TeleopError> {
        match &mut self.control {
            FeetechControl::Sts3215(c) => {
                let accs = vec![profile.acceleration; self.ids.len()];
                c.sync_write_acceleration(&self.ids, &accs)
                    .map_err(|_| TeleopError::Communication)?;
                let speeds = vec![profile.speed; self.ids.len()];
                c.sync_write_raw_goal_speed(&self.ids, &speeds)
                    .map_err(|_| TeleopError::Communication)
            }
            // SCS servos have no acceleration register; the ramp is left to
            // the device defaults.
            FeetechControl::Scs0009(_) => Ok(()),
        }
    }
}

impl ServoBus for FeetechBus {
    fn read_voltage(&mut self, id: MotorId) -> Result<f64, TeleopError> {
        let ids = vec![id.0];
        let raw = match &mut self.control {
            FeetechControl::Sts3215(c) => c
                .sync_read_present_voltage(&ids)
                .map_err(|_| TeleopError::Communication)?,
            FeetechControl::Scs0009(c) => c
                .sync_read_present_voltage(&ids)
                .map_err(|_| TeleopError::Communication)?,
        };

        // The register holds decivolts.
        match raw.first() {
            Some(v) => Ok(f64::from(*v) / 10.0),
            None => Err(TeleopError::InvalidResponse),
        }
    }

    fn read_positions(&mut self) -> Result<JointPositions, TeleopError> {
        let positions = match &mut self.control {
            FeetechControl::Sts3215(c) => c
                .sync_read_present_position(&self.ids)
                .map_err(|_| TeleopError::Communication)?,
            FeetechControl::Scs0009(c) => c
                .sync_read_present_position(&self.ids)
                .map_err(|_| TeleopError::Communication)?,
        };

        if positions.len() != self.ids.len() {
            return Err(TeleopError::InvalidResponse);
        }

        Ok(self
            .ids
            .iter()
            .zip(positions)
            .map(|(id, pos)| (MotorId(*id), pos))
            .collect())
    }

    fn write_positions(
        &mut self,
        targets: &JointPositions,
        profile: Option<MotionProfile>,
    ) -> Result<(), TeleopError> {
        if let Some(profile) = profile {
            self.write_profile(profile)?;
        }

        let ids: Vec<u8> = targets.keys().map(|id| id.0).collect();
        let positions: Vec<f64> = targets.values().copied().collect();

        match &mut self.control {
            FeetechControl::Sts3215(c) => c
                .sync_write_goal_position(&ids, &positions)
                .map_err(|_| TeleopError::Communication),
            FeetechControl::Scs0009(c) => c
                .sync_write_goal_position(&ids, &positions)
                .map_err(|_| TeleopError::Communication),
        }
    }

    fn joint_limit_calibration(&mut self) -> Result<(), TeleopError> {
        // Range limits live in servo EEPROM; this end only has to make sure
        // every servo answers and will hold the positions it is sent.
        self.set_torque(true)?;
        self.read_positions().map(|_| ())
    }

    fn set_torque(&mut self, enabled: bool) -> Result<(), TeleopError> {
        let values: Vec<u8> = vec![u8::from(enabled); self.ids.len()];

        match &mut self.control {
            FeetechControl::Sts3215(c) => c
                .sync_write_raw_torque_enable(&self.ids, &values)
                .map_err(|_| TeleopError::Communication),
            FeetechControl::Scs0009(c) => c
                .sync_write_torque_enable(&self.ids, &values)
                .map_err(|_| TeleopError::Communication),
        }
    }

    fn calibrate_middle_position(&mut self) -> Result<(), TeleopError> {
        // Writing 128 to the torque register recenters an STS servo's
        // current pose to 2048. SCS servos have no such command.
        let FeetechControl::Sts3215(c) = &mut self.control else {
            return Err(TeleopError::Unsupported);
        };

        let values = vec![128u8; self.ids.len()];
        c.sync_write_raw_torque_enable(&self.ids, &values)
            .map_err(|_| TeleopError::Communication)?;

        // Give the servos time to commit the new offset before verifying.
        std::thread::sleep(Duration::from_millis(200));

        for (id, pos) in self.read_positions()? {
            if (pos - MIDDLE_POSITION).abs() > 10.0 {
                warn!("servo {} is at {pos}, not recentered to 2048", id.0);
            }
        }

        Ok(())
    }
}

impl Drop for FeetechBus {
    fn drop(&mut self) {
        // Leave the arm limp rather than holding the last commanded pose.
        if self.set_torque(false).is_err() {
            warn!("failed to disable torque while closing the bus");
        }
    }
}
