use approx::assert_abs_diff_eq;
use dpend::prelude::*;

mod common;
use common::{horizontal, pendulum, propagate, HALF_PI};

#[test]
fn steppers_leave_equilibrium_unchanged() {
    let f = pendulum();
    let rest = State::default().to_array();
    let mut yt = [0.0; 4];
    for dt in [1e-4, 0.01, 0.5] {
        rk4_step(&f, 0.0, &rest, dt, &mut yt);
        assert_eq!(yt, rest);
        rk5_step(&f, 0.0, &rest, dt, &mut yt);
        assert_eq!(yt, rest);
    }
}

#[test]
fn rk4_and_rk5_agree_for_small_steps() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let a = propagate(&f, y0, 1e-4, 100, rk4_step);
    let b = propagate(&f, y0, 1e-4, 100, rk5_step);
    for i in 0..4 {
        assert!(
            (a[i] - b[i]).abs() < 1e-6,
            "field {}: rk4 {} vs rk5 {}",
            i,
            a[i],
            b[i]
        );
    }
}

#[test]
fn halving_dt_shrinks_global_error_at_the_expected_order() {
    let f = pendulum();
    let y0 = horizontal().to_array();

    // High-accuracy reference over the same 0.4 time units.
    let reference = propagate(&f, y0, 1e-4, 4000, rk5_step);
    let err = |y: [Float; 4]| -> Float {
        (0..4)
            .map(|i| (y[i] - reference[i]).abs())
            .fold(0.0, Float::max)
    };

    // RK4: global error is O(h^4), so halving h buys roughly 16x.
    let rk4_coarse = err(propagate(&f, y0, 0.02, 20, rk4_step));
    let rk4_fine = err(propagate(&f, y0, 0.01, 40, rk4_step));
    let rk4_ratio = rk4_coarse / rk4_fine;
    assert!(
        rk4_ratio > 8.0 && rk4_ratio < 40.0,
        "rk4 refinement ratio {} outside the 4th-order window",
        rk4_ratio
    );

    // RK5: O(h^5), roughly 32x.
    let rk5_coarse = err(propagate(&f, y0, 0.04, 10, rk5_step));
    let rk5_fine = err(propagate(&f, y0, 0.02, 20, rk5_step));
    let rk5_ratio = rk5_coarse / rk5_fine;
    assert!(
        rk5_ratio > 14.0 && rk5_ratio < 90.0,
        "rk5 refinement ratio {} outside the 5th-order window",
        rk5_ratio
    );

    // The 5th-order method gains more from refinement than the 4th.
    assert!(rk5_ratio > rk4_ratio);
}

#[test]
fn nearby_initial_conditions_diverge_chaotically() {
    let f = pendulum();
    let mut ya = horizontal().to_array();
    let mut yb = State::new(HALF_PI, HALF_PI, 0.0, 0.001).to_array();
    let mut yt = [0.0; 4];
    let dt = 0.01;

    let mut x = 0.0;
    let mut separation = Vec::with_capacity(1000);
    for _ in 0..1000 {
        rk4_step(&f, x, &ya, dt, &mut yt);
        ya = yt;
        rk4_step(&f, x, &yb, dt, &mut yt);
        yb = yt;
        x += dt;
        separation.push((ya[0] - yb[0]).abs());
    }

    let early: Float = separation[..100].iter().sum::<Float>() / 100.0;
    let late: Float = separation[900..].iter().sum::<Float>() / 100.0;
    // The separation is not monotonic, but the trend is up by orders of
    // magnitude.
    assert!(
        late > 10.0 * early,
        "separation did not grow: early {} late {}",
        early,
        late
    );
    assert!(separation[900..].iter().cloned().fold(0.0, Float::max) > 0.01);
}

#[test]
fn rk4_driver_matches_manual_stepping() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let sol = rk4(&f, 0.0, 1.0, &y0, 0.1, Args::default()).unwrap();
    assert_eq!(sol.status, Status::Success);
    assert_eq!(sol.nstep, 10);
    assert_eq!(sol.nfev, 40);
    assert_abs_diff_eq!(sol.x, 1.0, epsilon = 1e-12);

    // The driver shortens only the final step, so manual stepping at the
    // same h agrees to rounding.
    let manual = propagate(&f, y0, 0.1, 10, rk4_step);
    for i in 0..4 {
        assert_abs_diff_eq!(sol.y[i], manual[i], epsilon = 1e-9);
    }
}

#[test]
fn rk5_driver_counts_seven_evaluations_per_step() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let sol = rk5(&f, 0.0, 1.0, &y0, 0.1, Args::default()).unwrap();
    assert_eq!(sol.status, Status::Success);
    assert_eq!(sol.nstep, 10);
    assert_eq!(sol.nfev, 70);
}

#[test]
fn backward_integration_retraces_the_trajectory() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let fwd = rk4(&f, 0.0, 1.0, &y0, 0.001, Args::default()).unwrap();
    let back = rk4(&f, 1.0, 0.0, &fwd.y, -0.001, Args::default()).unwrap();
    for i in 0..4 {
        assert_abs_diff_eq!(back.y[i], y0[i], epsilon = 1e-6);
    }
}

struct StopAfter {
    calls: usize,
    limit: usize,
}

impl SolOut for StopAfter {
    fn solout(&mut self, _xold: Float, _x: Float, _y: &[Float]) -> ControlFlag {
        self.calls += 1;
        if self.calls > self.limit {
            ControlFlag::Interrupt
        } else {
            ControlFlag::Continue
        }
    }
}

#[test]
fn solout_interrupt_stops_the_driver() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let args = Args::builder()
        .solout(StopAfter { calls: 0, limit: 3 })
        .build();
    let sol = rk4(&f, 0.0, 10.0, &y0, 0.01, args).unwrap();
    assert_eq!(sol.status, Status::Interrupted);
    // One initial call plus three post-step calls pass; the fourth
    // post-step call interrupts.
    assert_eq!(sol.nstep, 3);
}

#[test]
fn nmax_caps_the_step_count() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    let args = Args::<DummySolOut>::builder().nmax(5).build();
    let sol = rk4(&f, 0.0, 10.0, &y0, 0.01, args).unwrap();
    assert_eq!(sol.status, Status::NeedLargerNmax);
    assert_eq!(sol.nstep, 5);
}

#[test]
fn zero_or_misdirected_step_sizes_are_rejected() {
    let f = pendulum();
    let y0 = horizontal().to_array();
    assert!(matches!(
        rk4(&f, 0.0, 1.0, &y0, 0.0, Args::default()),
        Err(Error::InvalidStepSize(_))
    ));
    assert!(matches!(
        rk4(&f, 0.0, 1.0, &y0, -0.1, Args::default()),
        Err(Error::InvalidStepSize(_))
    ));
    assert!(matches!(
        rk5(&f, 1.0, 0.0, &y0, 0.1, Args::default()),
        Err(Error::InvalidStepSize(_))
    ));
}
