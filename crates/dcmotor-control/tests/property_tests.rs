//! Property-based tests for the control loop.

use dcmotor_control::prelude::*;
use dcmotor_hal::prelude::*;
use proptest::prelude::*;

fn forward_edge() -> impl Strategy<Value = (Level, Level)> {
    prop_oneof![
        Just((Level::High, Level::Low)),
        Just((Level::Low, Level::High)),
    ]
}

fn reverse_edge() -> impl Strategy<Value = (Level, Level)> {
    prop_oneof![
        Just((Level::High, Level::High)),
        Just((Level::Low, Level::Low)),
    ]
}

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Low), Just(Level::High)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_every_channel_a_edge_moves_one_count(a in any_level(), b in any_level(), start in -500i32..500) {
        let encoder = QuadratureEncoder::new(0);
        for _ in 0..start.unsigned_abs() {
            if start >= 0 {
                encoder.on_channel_a(Level::High, Level::Low, 0);
            } else {
                encoder.on_channel_a(Level::High, Level::High, 0);
            }
        }
        let before = encoder.position();
        encoder.on_channel_a(a, b, 1);
        let expected = if a == b { -1 } else { 1 };
        prop_assert_eq!(encoder.position() - before, expected);
    }

    #[test]
    fn prop_forward_then_reverse_returns_home(
        forward in proptest::collection::vec(forward_edge(), 0..200),
        reverse_seed in proptest::collection::vec(reverse_edge(), 200),
    ) {
        let encoder = QuadratureEncoder::new(0);
        let mut now = 0u64;
        for (a, b) in &forward {
            now += 10;
            encoder.on_channel_a(*a, *b, now);
        }
        prop_assert_eq!(encoder.position(), i32::try_from(forward.len()).unwrap_or(i32::MAX));

        for (a, b) in reverse_seed.iter().take(forward.len()) {
            now += 10;
            encoder.on_channel_a(*a, *b, now);
        }
        prop_assert_eq!(encoder.position(), 0);
    }

    #[test]
    fn prop_channel_b_never_moves_position(edges in 0usize..100, start in 0u64..1_000_000) {
        let encoder = QuadratureEncoder::new(start);
        encoder.on_channel_a(Level::High, Level::Low, start);
        for i in 0..edges {
            encoder.on_channel_b(start + i as u64);
        }
        let state = encoder.snapshot();
        prop_assert_eq!(state.position, 1);
        prop_assert_eq!(state.direction, Direction::Forward);
    }

    #[test]
    fn prop_velocity_within_ceiling(
        dt in 0u64..1_000_000,
        reverse in any::<bool>(),
        max_velocity in 1.0f32..10_000.0,
    ) {
        let mut estimator = VelocityEstimator::new(max_velocity, 100);
        let snapshot = EncoderState {
            position: 0,
            direction: if reverse { Direction::Reverse } else { Direction::Forward },
            last_transition_us: 1_000_000 + dt,
            previous_transition_us: 1_000_000,
            transitions: 1,
        };
        let update = estimator.estimate(&snapshot, snapshot.last_transition_us / 1_000);
        prop_assert!(update.velocity.abs() <= max_velocity);
        prop_assert!(update.velocity.is_finite());
    }

    #[test]
    fn prop_stall_zeroes_any_prior_velocity(
        dt in 1u64..10_000,
        timeout in 1u32..1_000,
        extra in 1u64..10_000,
    ) {
        let mut estimator = VelocityEstimator::new(3200.0, timeout);
        let snapshot = EncoderState {
            position: 1,
            direction: Direction::Forward,
            last_transition_us: dt,
            previous_transition_us: 0,
            transitions: 1,
        };
        let edge_ms = dt / 1_000;
        estimator.estimate(&snapshot, edge_ms);
        let update = estimator.estimate(&snapshot, edge_ms + u64::from(timeout) + extra);
        prop_assert!(update.velocity.abs() < f32::EPSILON);
    }

    #[test]
    fn prop_edges_first_seen_after_window_read_zero(
        edges in 2u32..50,
        interval_us in 50u64..5_000,
        timeout in 1u32..1_000,
        late_ms in 1u64..10_000,
    ) {
        let encoder = QuadratureEncoder::new(0);
        let mut now_us = 0u64;
        for _ in 0..edges {
            now_us += interval_us;
            encoder.on_channel_a(Level::High, Level::Low, now_us);
        }
        let snapshot = encoder.snapshot();

        let mut estimator = VelocityEstimator::new(3200.0, timeout);
        let now_ms = now_us / 1_000 + u64::from(timeout) + late_ms;
        let update = estimator.estimate(&snapshot, now_ms);
        prop_assert!(update.velocity.abs() < f32::EPSILON);
        prop_assert!(update.stalled);
    }

    #[test]
    fn prop_zero_gains_always_zero(
        errors in proptest::collection::vec((-1.0e6f32..1.0e6, -1.0e6f32..1.0e6), 1..100),
    ) {
        let mut pid = PidController::new(PidGains::default(), 100.0, 1000.0);
        for (desired, measured) in errors {
            prop_assert!(pid.velocity_command(desired, measured).raw.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn prop_windup_bounded(
        error in -1.0e4f32..1.0e4,
        cycles in 1usize..500,
        position in any::<bool>(),
    ) {
        let mut pid = PidController::new(PidGains::new(0.0, 1.0, 0.0), 100.0, 1000.0);
        let bound = if position { 1000.0 } else { 100.0 };
        for _ in 0..cycles {
            let out = if position {
                pid.position_command(error as i32, 0)
            } else {
                pid.velocity_command(error, 0.0)
            };
            prop_assert!(out.error_sum.abs() <= bound);
        }
    }

    #[test]
    fn prop_driver_duty_within_ceiling(power in any::<i32>(), max_pwm in any::<u16>(), inverted in any::<bool>()) {
        let polarity = if inverted { Polarity::Inverted } else { Polarity::Normal };
        let mut hal = SimulatedHal::new();
        let out = MotorDriver::drive(&mut hal, DriveCommand::new(power, polarity), max_pwm);
        prop_assert!(out.duty <= max_pwm);
        prop_assert_eq!(u32::from(out.duty), power.unsigned_abs().min(u32::from(max_pwm)));
        if power == 0 {
            prop_assert_eq!(hal.direction_pins(), (Level::Low, Level::Low));
        } else {
            prop_assert_ne!(out.direction1, out.direction2);
        }
    }

    #[test]
    fn prop_velocity_mode_respects_setpoint_sign(
        target in -5_000.0f32..5_000.0,
        kp in 0.0f32..10.0,
        ki in 0.0f32..10.0,
        kd in 0.0f32..10.0,
        steps in proptest::collection::vec(1u64..50_000, 1..40),
        max_pwm in 1u16..1024,
    ) {
        let Ok(config) = MotorConfig::builder()
            .max_pwm(max_pwm)
            .gains(PidGains::new(kp, ki, kd))
            .build()
        else {
            return Err(TestCaseError::fail("config rejected"));
        };
        let Ok(mut motor) = DcMotorController::new(SimulatedHal::new(), config) else {
            return Err(TestCaseError::fail("construction failed"));
        };
        motor.set_desired_velocity(target);
        for step in steps {
            motor.hal_mut().advance_us(step);
            let report = motor.update();
            prop_assert!(report.output.duty <= max_pwm);
            if target >= 0.0 {
                prop_assert!(report.commanded_power >= 0);
                prop_assert_ne!(report.output.state, BridgeState::Reverse);
            } else {
                prop_assert!(report.commanded_power <= 0);
                prop_assert_ne!(report.output.state, BridgeState::Forward);
            }
        }
    }

    #[test]
    fn prop_position_mode_symmetric_bound(
        target in any::<i32>(),
        kp in 0.0f32..100.0,
        max_pwm in 1u16..1024,
        cycles in 1usize..30,
    ) {
        let Ok(config) = MotorConfig::builder()
            .max_pwm(max_pwm)
            .gains(PidGains::new(kp, 0.0, 0.0))
            .build()
        else {
            return Err(TestCaseError::fail("config rejected"));
        };
        let Ok(mut motor) = DcMotorController::new(SimulatedHal::new(), config) else {
            return Err(TestCaseError::fail("construction failed"));
        };
        motor.set_desired_position(target);
        for _ in 0..cycles {
            motor.hal_mut().advance_ms(10);
            let report = motor.update();
            prop_assert!(report.commanded_power.unsigned_abs() <= u32::from(max_pwm));
        }
    }
}
