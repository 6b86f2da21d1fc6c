//! Desktop demo driving the smoothing controller against mock collaborators.
//!
//! Binds two Cartesian steppers to a mock planner, then applies
//! `SET_SMOOTH_AXIS` lines from the command line (joined as one command) or
//! interactively from stdin, printing the confirmation or the rejection
//! after each one.
//!
//! # Run
//!
//! ```bash
//! # One command from the arguments
//! cargo run --bin smooth_axis_demo -- SMOOTHER=di TARGET_FREQ_XY=45 DAMPING_RATIO_XY=0.1
//!
//! # Interactive
//! cargo run --bin smooth_axis_demo
//! ```

use std::io::{self, BufRead, Write};

use smooth_axis::hal::mock::{MockMotion, MockPlanner, MockStepper};
use smooth_axis::traits::Stepper;
use smooth_axis::{
    Axis, SmoothAxisCommand, SmoothingConfig, SmoothingController, COMMAND_NAME,
};

fn main() -> anyhow::Result<()> {
    println!();
    println!("================================");
    println!("  smooth-axis demo");
    println!("================================");
    println!();

    let config = SmoothingConfig::default();
    let mut controller = SmoothingController::new(MockPlanner::new(), config)?;

    let mut steppers = vec![
        MockStepper::cartesian("stepper_x", Axis::X),
        MockStepper::cartesian("stepper_y", Axis::Y),
    ];
    let attached = controller.bind(&mut steppers);
    println!("bound {attached} steppers, scan window {:.6}s", controller.scan_window());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let line = format!("{COMMAND_NAME} {}", args.join(" "));
        run_line(&mut controller, &steppers, &line);
        controller.shutdown(&mut steppers);
        return Ok(());
    }

    println!("enter {COMMAND_NAME} lines (empty line quits):");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        run_line(&mut controller, &steppers, line.trim());
    }

    controller.shutdown(&mut steppers);
    println!("shut down, steppers restored to native kinematics");
    Ok(())
}

fn run_line<P>(
    controller: &mut SmoothingController<P>,
    steppers: &[MockStepper],
    line: &str,
) where
    P: smooth_axis::MotionPlanner,
    P::Error: core::fmt::Debug,
{
    let cmd = match SmoothAxisCommand::parse(line) {
        Ok(cmd) => cmd,
        Err(err) => {
            println!("parse error: {err}");
            return;
        }
    };
    match controller.apply_command(&cmd) {
        Ok(confirmation) => {
            println!("{confirmation}");
            println!("scan window now {:.6}s", controller.scan_window());
            sample_positions(steppers);
        }
        Err(err) => println!("rejected: {err}"),
    }
}

/// Show the filter's effect on a short accelerating move.
fn sample_positions(steppers: &[MockStepper]) {
    let motion = MockMotion::new()
        .with_axis(Axis::X, 0.0, 50.0, 1500.0)
        .with_axis(Axis::Y, 0.0, 50.0, 1500.0);
    for stepper in steppers {
        let pos = stepper.position(&motion, 0.2);
        println!("  {}: {pos:.6} mm at t=0.2s", stepper.name());
    }
}
