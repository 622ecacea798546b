pub mod bus;
pub mod bus_feetech;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod port;
pub mod resolver;
pub mod sync;
pub mod teleop;

pub use bus::ServoBus;
pub use bus_feetech::FeetechBus;
pub use clock::{Clock, SystemClock};
pub use config::TeleopConfig;
pub use error::TeleopError;
pub use model::{JointPositions, MotionProfile, MotorId, Role, ServoModel};
pub use port::{find_servo_ports, pick_two};
pub use resolver::{classify, resolve_roles};
pub use sync::{synchronize, within_tolerance};
pub use teleop::{remaining_sleep, run_teleop};
