//! Shared fixtures for the integration test suites.

use dpend::prelude::*;

pub const HALF_PI: Float = std::f64::consts::FRAC_PI_2 as Float;

/// Default pendulum used across the suites: unit masses and rod lengths,
/// g = 9.81.
pub fn pendulum() -> DoublePendulum {
    DoublePendulum::default()
}

/// Both rods raised to the horizontal, at rest.
pub fn horizontal() -> State {
    State::new(HALF_PI, HALF_PI, 0.0, 0.0)
}

/// Step function signature shared by the two steppers.
pub type StepFn = fn(&DoublePendulum, Float, &[Float], Float, &mut [Float]);

/// Propagate `y0` over `steps` fixed increments of `h` with the given
/// stepper.
pub fn propagate(
    f: &DoublePendulum,
    y0: [Float; 4],
    h: Float,
    steps: usize,
    step: StepFn,
) -> [Float; 4] {
    let mut y = y0;
    let mut yt = [0.0; 4];
    let mut x = 0.0;
    for _ in 0..steps {
        step(f, x, &y, h, &mut yt);
        y = yt;
        x += h;
    }
    y
}
