//! End-to-end tests for the smoothing controller protocol: bind, runtime
//! retuning, window negotiation and shutdown, all against the mock planner
//! and steppers.

use smooth_axis::{
    hal::mock::{MockMotion, MockPlanner, MockStepper},
    Axis, AxisFilterState, ControllerState, SmoothAxisCommand, SmootherVariant, SmoothingConfig,
    SmoothingController, SmoothingError, Stepper,
};

fn bound_controller() -> (SmoothingController<MockPlanner>, Vec<MockStepper>) {
    let mut controller =
        SmoothingController::new(MockPlanner::new(), SmoothingConfig::default()).unwrap();
    let mut steppers = vec![
        MockStepper::cartesian("stepper_x", Axis::X),
        MockStepper::cartesian("stepper_y", Axis::Y),
    ];
    controller.bind(&mut steppers);
    (controller, steppers)
}

// ============================================================================
// Command Application
// ============================================================================

#[test]
fn retune_extends_window_and_confirms() {
    let (mut controller, _steppers) = bound_controller();

    let cmd =
        SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=40 DAMPING_RATIO_X=0.1").unwrap();
    let confirmation = controller.apply_command(&cmd).unwrap();

    let hst_x = controller.axis_state(Axis::X).half_smooth_time();
    assert!(hst_x > 0.0);
    // Grow happened before commit, with exactly the required delta.
    assert_eq!(controller.planner().extend_calls, vec![hst_x]);
    assert_eq!(controller.scan_window(), hst_x);

    assert!(confirmation.contains("target_freq_x:40.000000000"));
    assert!(confirmation.contains("target_freq_y:0.000000000"));
    assert!(confirmation.contains("damping_ratio_x:0.100000000"));
}

#[test]
fn omitted_parameters_keep_current_values() {
    let (mut controller, _steppers) = bound_controller();

    let cmd = SmoothAxisCommand::parse(
        "SET_SMOOTH_AXIS SMOOTHER=accel TARGET_FREQ_X=40 DAMPING_RATIO_X=0.1",
    )
    .unwrap();
    controller.apply_command(&cmd).unwrap();

    // A later command touching only Y leaves X's tuning alone.
    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_Y=35").unwrap();
    controller.apply_command(&cmd).unwrap();

    let x = controller.axis_state(Axis::X);
    let y = controller.axis_state(Axis::Y);
    assert_eq!(x.target_freq, 40.0);
    assert_eq!(x.damping_ratio, 0.1);
    assert_eq!(x.variant, SmootherVariant::AccelForm);
    assert_eq!(y.target_freq, 35.0);
    // The variant is shared by both axes.
    assert_eq!(y.variant, SmootherVariant::AccelForm);
}

#[test]
fn reissuing_current_parameters_is_idempotent() {
    let (mut controller, _steppers) = bound_controller();

    let cmd =
        SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=40 DAMPING_RATIO_XY=0.1").unwrap();
    controller.apply_command(&cmd).unwrap();
    let window = controller.scan_window();
    let extends = controller.planner().extend_calls.len();

    controller.apply_command(&cmd).unwrap();
    assert_eq!(controller.scan_window(), window);
    assert_eq!(controller.planner().extend_calls.len(), extends);
    assert!(controller.planner().shrink_notes.is_empty());
}

#[test]
fn unknown_smoother_is_rejected_without_side_effects() {
    let (mut controller, _steppers) = bound_controller();

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS SMOOTHER=sinc TARGET_FREQ_X=40").unwrap();
    let err = controller.apply_command(&cmd).unwrap_err();
    assert_eq!(err, SmoothingError::UnknownSmoother("sinc".to_string()));
    assert_eq!(controller.axis_state(Axis::X).target_freq, 0.0);
    assert!(controller.planner().extend_calls.is_empty());
}

#[test]
fn out_of_range_damping_is_rejected_without_planner_call() {
    let (mut controller, _steppers) = bound_controller();

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS DAMPING_RATIO_Y=1.5").unwrap();
    let err = controller.apply_command(&cmd).unwrap_err();
    assert_eq!(
        err,
        SmoothingError::InvalidParameter {
            key: "DAMPING_RATIO_Y",
            value: 1.5,
        }
    );
    assert_eq!(*controller.axis_state(Axis::Y), AxisFilterState::default());
    assert!(controller.planner().extend_calls.is_empty());
}

#[test]
fn nan_frequency_is_rejected() {
    let (mut controller, _steppers) = bound_controller();

    let cmd = SmoothAxisCommand::new().with_target_freq_x(f64::NAN);
    let err = controller.apply_command(&cmd).unwrap_err();
    assert!(matches!(
        err,
        SmoothingError::InvalidParameter {
            key: "TARGET_FREQ_X",
            ..
        }
    ));
}

#[test]
fn zero_frequency_disables_an_axis() {
    let (mut controller, _steppers) = bound_controller();

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=40").unwrap();
    controller.apply_command(&cmd).unwrap();
    assert!(controller.scan_window() > 0.0);

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=0").unwrap();
    controller.apply_command(&cmd).unwrap();
    assert_eq!(controller.axis_state(Axis::X).half_smooth_time(), 0.0);
    assert_eq!(controller.scan_window(), 0.0);
    // The release was advisory, not a planner requirement.
    assert_eq!(controller.planner().shrink_notes.len(), 1);
}

// ============================================================================
// Window Protocol
// ============================================================================

#[test]
fn window_is_max_of_axes_not_sum() {
    let (mut controller, _steppers) = bound_controller();

    let cmd =
        SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=40 TARGET_FREQ_Y=20").unwrap();
    controller.apply_command(&cmd).unwrap();

    let hst_x = controller.axis_state(Axis::X).half_smooth_time();
    let hst_y = controller.axis_state(Axis::Y).half_smooth_time();
    assert!(hst_y > hst_x);
    assert_eq!(controller.scan_window(), hst_y);
    assert!(controller.scan_window() < hst_x + hst_y);
}

#[test]
fn planner_horizon_always_covers_published_window() {
    let (mut controller, _steppers) = bound_controller();

    // A sequence of grows and shrinks; the honored horizon must cover the
    // published window after every step.
    for line in [
        "SET_SMOOTH_AXIS TARGET_FREQ_XY=20",
        "SET_SMOOTH_AXIS TARGET_FREQ_XY=50",
        "SET_SMOOTH_AXIS TARGET_FREQ_XY=30 DAMPING_RATIO_XY=0.5",
        "SET_SMOOTH_AXIS TARGET_FREQ_XY=0",
        "SET_SMOOTH_AXIS TARGET_FREQ_X=25",
    ] {
        let cmd = SmoothAxisCommand::parse(line).unwrap();
        controller.apply_command(&cmd).unwrap();
        let required = controller
            .axis_state(Axis::X)
            .half_smooth_time()
            .max(controller.axis_state(Axis::Y).half_smooth_time());
        assert_eq!(controller.scan_window(), required);
        assert!(
            controller.planner().horizon >= required,
            "horizon {} < required {} after {line}",
            controller.planner().horizon,
            required
        );
    }
}

#[test]
fn widening_parameters_extend_again() {
    let (mut controller, _steppers) = bound_controller();

    // 50 Hz first, then 20 Hz: the lower frequency needs the wider window,
    // so each step grows.
    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=50").unwrap();
    controller.apply_command(&cmd).unwrap();
    let first = controller.scan_window();

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=20").unwrap();
    controller.apply_command(&cmd).unwrap();
    let second = controller.scan_window();

    assert!(second > first);
    assert_eq!(controller.planner().extend_calls, vec![first, second - first]);
    assert!(controller.planner().shrink_notes.is_empty());
}

#[test]
fn rejected_extension_is_atomic() {
    let mut controller = SmoothingController::new(
        MockPlanner::new().with_capacity(0.05),
        SmoothingConfig::default(),
    )
    .unwrap();
    let mut steppers = vec![MockStepper::cartesian("stepper_x", Axis::X)];
    controller.bind(&mut steppers);

    // Fits the capacity.
    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=40").unwrap();
    controller.apply_command(&cmd).unwrap();
    let before = *controller.axis_state(Axis::X);
    let window = controller.scan_window();

    // Needs a window past the capacity.
    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=5").unwrap();
    let err = controller.apply_command(&cmd).unwrap_err();
    assert_eq!(err, SmoothingError::WindowExtensionRejected);

    // Exactly the pre-change values, and the issuer may retry with others.
    assert_eq!(*controller.axis_state(Axis::X), before);
    assert_eq!(controller.scan_window(), window);
    assert_eq!(controller.state(), ControllerState::Bound);

    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=45").unwrap();
    controller.apply_command(&cmd).unwrap();
    assert_eq!(controller.axis_state(Axis::X).target_freq, 45.0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn startup_config_is_applied_at_bind() {
    let config = SmoothingConfig::default()
        .with_smoother(SmootherVariant::PositionForm)
        .with_target_freq_x(40.0)
        .with_damping_ratio_x(0.1);
    let mut controller = SmoothingController::new(MockPlanner::new(), config).unwrap();
    let mut steppers = vec![MockStepper::cartesian("stepper_x", Axis::X)];

    controller.bind(&mut steppers);
    assert_eq!(controller.state(), ControllerState::Bound);
    let x = controller.axis_state(Axis::X);
    assert_eq!(x.variant, SmootherVariant::PositionForm);
    assert_eq!(x.target_freq, 40.0);
    assert_eq!(controller.scan_window(), x.half_smooth_time());
}

#[test]
fn detach_restores_native_queries_exactly() {
    let (mut controller, mut steppers) = bound_controller();
    let motion = MockMotion::new()
        .with_axis(Axis::X, 2.0, 40.0, 900.0)
        .with_axis(Axis::Y, -1.0, 25.0, 600.0);

    // Reference: a stepper that was never attached.
    let reference = MockStepper::cartesian("stepper_x", Axis::X);
    let expected: Vec<f64> = [0.1, 0.35, 0.8]
        .iter()
        .map(|&t| reference.position(&motion, t))
        .collect();

    let cmd =
        SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_XY=30 DAMPING_RATIO_XY=0.2").unwrap();
    controller.apply_command(&cmd).unwrap();
    // Filtered queries differ while attached.
    assert_ne!(steppers[0].position(&motion, 0.35), expected[1]);

    controller.shutdown(&mut steppers);
    for (i, &t) in [0.1, 0.35, 0.8].iter().enumerate() {
        assert_eq!(steppers[0].position(&motion, t), expected[i]);
    }
}

#[test]
fn controller_can_rebind_after_shutdown() {
    let (mut controller, mut steppers) = bound_controller();
    controller.shutdown(&mut steppers);
    assert_eq!(controller.state(), ControllerState::Uninitialized);

    let attached = controller.bind(&mut steppers);
    assert_eq!(attached, 2);
    assert_eq!(controller.state(), ControllerState::Bound);
    let cmd = SmoothAxisCommand::parse("SET_SMOOTH_AXIS TARGET_FREQ_X=40").unwrap();
    controller.apply_command(&cmd).unwrap();
    assert!(controller.scan_window() > 0.0);
}
