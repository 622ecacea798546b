use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use sts_scs_teleop::{
    pick_two, resolve_roles, run_teleop, synchronize, Clock, JointPositions, MotionProfile,
    MotorId, ServoBus, TeleopConfig, TeleopError,
};

fn pose(entries: &[(u8, f64)]) -> JointPositions {
    entries
        .iter()
        .map(|(id, pos)| (MotorId(*id), *pos))
        .collect()
}

/// Simulated arm: fixed supply voltage, scripted position readings, and a
/// record of every goal-position write it receives.
struct FakeArm {
    voltage: f64,
    readings: VecDeque<JointPositions>,
    writes: Vec<(JointPositions, Option<MotionProfile>)>,
    calibrations: usize,
    reads: usize,
    cancel_after_reads: Option<(usize, Arc<AtomicBool>)>,
}

impl FakeArm {
    fn new(voltage: f64, readings: Vec<JointPositions>) -> Self {
        Self {
            voltage,
            readings: readings.into(),
            writes: Vec::new(),
            calibrations: 0,
            reads: 0,
            cancel_after_reads: None,
        }
    }
}

impl ServoBus for FakeArm {
    fn read_voltage(&mut self, _id: MotorId) -> Result<f64, TeleopError> {
        Ok(self.voltage)
    }

    fn read_positions(&mut self) -> Result<JointPositions, TeleopError> {
        self.reads += 1;
        if let Some((limit, flag)) = &self.cancel_after_reads {
            if self.reads >= *limit {
                flag.store(true, Ordering::SeqCst);
            }
        }

        let front = self.readings.front().cloned().unwrap_or_default();
        if self.readings.len() > 1 {
            self.readings.pop_front();
        }
        Ok(front)
    }

    fn write_positions(
        &mut self,
        targets: &JointPositions,
        profile: Option<MotionProfile>,
    ) -> Result<(), TeleopError> {
        self.writes.push((targets.clone(), profile));
        Ok(())
    }

    fn joint_limit_calibration(&mut self) -> Result<(), TeleopError> {
        self.calibrations += 1;
        Ok(())
    }

    fn set_torque(&mut self, _enabled: bool) -> Result<(), TeleopError> {
        Ok(())
    }
}

/// Clock advancing a fixed step per `now` call; sleeps are recorded instead
/// of waited out.
struct SteppingClock {
    now: Cell<Instant>,
    step: Duration,
    sleeps: RefCell<Vec<Duration>>,
}

impl SteppingClock {
    fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Instant::now()),
            step,
            sleeps: RefCell::new(Vec::new()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.now.set(self.now.get() + duration);
    }
}

#[test]
fn voltage_classification_assigns_roles() {
    let cfg = TeleopConfig::default();

    let arm1 = FakeArm::new(5.0, vec![]);
    let arm2 = FakeArm::new(12.0, vec![]);
    let (leader, follower) =
        resolve_roles(&cfg, arm1, arm2, "/dev/ttyUSB0", "/dev/ttyUSB1").unwrap();
    assert_eq!(leader.voltage, 5.0);
    assert_eq!(follower.voltage, 12.0);

    let arm1 = FakeArm::new(12.0, vec![]);
    let arm2 = FakeArm::new(5.0, vec![]);
    let (leader, follower) =
        resolve_roles(&cfg, arm1, arm2, "/dev/ttyUSB0", "/dev/ttyUSB1").unwrap();
    assert_eq!(leader.voltage, 5.0);
    assert_eq!(follower.voltage, 12.0);
}

#[test]
fn middle_position_calibration_defaults_to_unsupported() {
    let mut arm = FakeArm::new(5.0, vec![]);
    assert!(matches!(
        arm.calibrate_middle_position(),
        Err(TeleopError::Unsupported)
    ));
}

#[test]
fn discovery_fails_before_any_handle_exists() {
    let err = pick_two(vec!["/dev/ttyUSB0".to_string()]).unwrap_err();
    match err {
        TeleopError::PortDiscovery { found } => assert_eq!(found, vec!["/dev/ttyUSB0"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn full_session_mirrors_leader_onto_follower() {
    let cfg = TeleopConfig::default();
    let clock = SteppingClock::new(Duration::from_millis(1));
    let leader_pose = pose(&[(1, 1500.0), (2, 2500.0), (3, 2048.0)]);

    let arm1 = FakeArm::new(5.0, vec![leader_pose.clone()]);
    let arm2 = FakeArm::new(
        12.0,
        vec![
            pose(&[(1, 800.0), (2, 2500.0), (3, 2048.0)]),
            pose(&[(1, 1490.0), (2, 2510.0), (3, 2048.0)]),
        ],
    );

    let (mut leader, mut follower) =
        resolve_roles(&cfg, arm1, arm2, "/dev/ttyUSB0", "/dev/ttyUSB1").unwrap();

    synchronize(&mut leader, &mut follower, &cfg, &clock).unwrap();

    // Calibrated once, converged on the second poll, and the initial move
    // used the slow approach profile.
    assert_eq!(follower.calibrations, 1);
    assert_eq!(follower.reads, 2);
    assert_eq!(follower.writes.len(), 1);
    assert_eq!(follower.writes[0].1, Some(cfg.approach_profile));

    // Stop after three more leader reads: one read per loop iteration.
    let cancel = Arc::new(AtomicBool::new(false));
    leader.cancel_after_reads = Some((leader.reads + 3, Arc::clone(&cancel)));

    run_teleop(&mut leader, &mut follower, &cfg, &cancel, &clock).unwrap();

    assert_eq!(follower.writes.len(), 4);
    for (written, profile) in &follower.writes[1..] {
        assert_eq!(written, &leader_pose);
        assert_eq!(*profile, None);
    }

    // Each iteration measured 1 ms against the 5 ms period.
    let sleeps = clock.sleeps.borrow();
    assert_eq!(sleeps.as_slice(), [Duration::from_millis(4); 3]);
}

#[test]
fn overlong_iteration_skips_the_sleep() {
    let cfg = TeleopConfig::default();
    // now() advances a full period per call, so every iteration measures
    // exactly 5 ms of work.
    let clock = SteppingClock::new(cfg.period());

    let cancel = Arc::new(AtomicBool::new(false));
    let mut leader = FakeArm::new(5.0, vec![pose(&[(1, 1000.0)])]);
    leader.cancel_after_reads = Some((2, Arc::clone(&cancel)));
    let mut follower = FakeArm::new(12.0, vec![]);

    run_teleop(&mut leader, &mut follower, &cfg, &cancel, &clock).unwrap();

    assert_eq!(follower.writes.len(), 2);
    assert!(clock.sleeps.borrow().is_empty());
}

#[test]
fn sync_timeout_does_not_block_teleoperation() {
    let cfg = TeleopConfig::default();
    // 3 s per now() call: the 5 s sync window closes before convergence.
    let clock = SteppingClock::new(Duration::from_secs(3));

    let mut leader = FakeArm::new(5.0, vec![pose(&[(1, 1500.0)])]);
    let mut follower = FakeArm::new(12.0, vec![pose(&[(1, 100.0)])]);

    synchronize(&mut leader, &mut follower, &cfg, &clock).unwrap();

    // Teleoperation still runs after the soft timeout.
    let cancel = Arc::new(AtomicBool::new(false));
    leader.cancel_after_reads = Some((leader.reads + 1, Arc::clone(&cancel)));
    run_teleop(&mut leader, &mut follower, &cfg, &cancel, &clock).unwrap();

    assert_eq!(follower.writes.last().unwrap().1, None);
}
