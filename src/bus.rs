use crate::{
    error::TeleopError,
    model::{JointPositions, MotionProfile, MotorId},
};

/// Boundary to the servo-controller driver. Packet framing, register maps
/// and calibration math all live below this trait; the teleoperation phases
/// only ever see these operations.
pub trait ServoBus {
    /// Supply voltage of one servo, in volts.
    fn read_voltage(&mut self, id: MotorId) -> Result<f64, TeleopError>;

    /// Positions of all configured servos.
    fn read_positions(&mut self) -> Result<JointPositions, TeleopError>;

    /// Command the given goal positions. A profile limits speed/acceleration
    /// for the move; `None` leaves the device defaults (full speed, no ramp).
    fn write_positions(
        &mut self,
        targets: &JointPositions,
        profile: Option<MotionProfile>,
    ) -> Result<(), TeleopError>;

    /// Establish that motion commands can be trusted on this bus. Blocks
    /// until done; must complete before the first goal-position write.
    fn joint_limit_calibration(&mut self) -> Result<(), TeleopError>;

    fn set_torque(&mut self, enabled: bool) -> Result<(), TeleopError>;

    /// Recenter every servo so its current pose reads as 2048.
    fn calibrate_middle_position(&mut self) -> Result<(), TeleopError> {
        Err(TeleopError::Unsupported)
    }
}
