//! Pairwise divergence accumulation between an RK4- and an RK5-tracked
//! trajectory.

use bon::Builder;
use log::debug;

use crate::{
    error::Error,
    pendulum::{DoublePendulum, State},
    rk::{rk4_step, rk5_step},
    Float,
};

/// One row of comparison output: a timestamp and four non-negative error
/// magnitudes for `theta1, theta2, omega1, omega2`.
///
/// `Display` renders the five whitespace-separated columns of the error-log
/// contract: `time e_theta1 e_theta2 e_omega1 e_omega2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorSample {
    pub time: Float,
    pub theta1: Float,
    pub theta2: Float,
    pub omega1: Float,
    pub omega2: Float,
}

impl std::fmt::Display for ErrorSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.time, self.theta1, self.theta2, self.omega1, self.omega2
        )
    }
}

#[derive(Builder, Clone, Debug)]
/// Args for [`run_divergence`]
pub struct DivergenceArgs {
    /// Fixed step size shared by both integrators. Default is 0.01.
    #[builder(default = 0.01)]
    pub dt: Float,
    /// Time horizon, inclusive of the boundary sample at `time == horizon`.
    /// Default is 10.0.
    #[builder(default = 10.0)]
    pub horizon: Float,
}

impl Default for DivergenceArgs {
    fn default() -> Self {
        Self {
            dt: 0.01,
            horizon: 10.0,
        }
    }
}

/// Output of [`run_divergence`]: the per-step samples, their field-wise
/// totals, and the usual counters.
#[derive(Clone, Debug)]
pub struct DivergenceReport {
    /// Final RK4-tracked state.
    pub rk4_state: State,
    /// Final RK5-tracked state.
    pub rk5_state: State,
    /// Absolute per-step samples.
    pub abs_samples: Vec<ErrorSample>,
    /// Relative per-step samples (the divisor is the RK5 field).
    pub rel_samples: Vec<ErrorSample>,
    /// Field-wise sum of the absolute samples: theta1, theta2, omega1, omega2.
    pub abs_totals: [Float; 4],
    /// Field-wise sum of the relative samples.
    pub rel_totals: [Float; 4],
    /// Derivative evaluations across both integrators.
    pub nfev: usize,
    /// Steps taken by each integrator.
    pub nstep: usize,
}

/// Run the RK4- and RK5-tracked trajectories side by side and accumulate
/// their pairwise divergence.
///
/// Each iteration advances both states by `dt` (independently, one after the
/// other), then records the absolute (`|rk4 - rk5|`) and relative
/// (`|rk4 - rk5| / |rk5|`) difference per field, labeled with the elapsed
/// time before the increment. The loop runs while `time <= horizon` over the
/// accumulated time, so the conventional `dt = 0.01`, `horizon = 10.0` run
/// produces 1001 samples at `time = 0, 0.01, …, 10.00`.
///
/// The totals are raw field-wise sums over all samples — not an integral —
/// so their magnitude is sensitive to `dt` and step count by construction.
/// A zero RK5 field makes the relative column infinite or NaN, and
/// non-finite trajectory values propagate into the samples untouched.
pub fn run_divergence(
    f: &DoublePendulum,
    init_rk4: State,
    init_rk5: State,
    args: DivergenceArgs,
) -> Result<DivergenceReport, Error> {
    if !(args.dt > 0.0) || !args.dt.is_finite() {
        return Err(Error::InvalidStepSize(args.dt));
    }
    if !args.horizon.is_finite() || args.horizon < 0.0 {
        return Err(Error::InvalidHorizon(args.horizon));
    }

    debug!(
        "divergence run: dt = {}, horizon = {}",
        args.dt, args.horizon
    );

    let dt = args.dt;
    let mut y4 = init_rk4.to_array();
    let mut y5 = init_rk5.to_array();
    let mut yt = [0.0; 4];

    let capacity = (args.horizon / dt) as usize + 2;
    let mut abs_samples = Vec::with_capacity(capacity);
    let mut rel_samples = Vec::with_capacity(capacity);
    let mut abs_totals = [0.0; 4];
    let mut rel_totals = [0.0; 4];
    let mut nfev = 0;
    let mut nstep = 0;

    let mut time = 0.0;
    while time <= args.horizon {
        rk4_step(f, time, &y4, dt, &mut yt);
        y4 = yt;
        rk5_step(f, time, &y5, dt, &mut yt);
        y5 = yt;
        nfev += 11;
        nstep += 1;

        let mut abs = [0.0; 4];
        let mut rel = [0.0; 4];
        for i in 0..4 {
            abs[i] = (y4[i] - y5[i]).abs();
            rel[i] = (y4[i] - y5[i]).abs() / y5[i].abs();
            abs_totals[i] += abs[i];
            rel_totals[i] += rel[i];
        }
        abs_samples.push(ErrorSample {
            time,
            theta1: abs[0],
            theta2: abs[1],
            omega1: abs[2],
            omega2: abs[3],
        });
        rel_samples.push(ErrorSample {
            time,
            theta1: rel[0],
            theta2: rel[1],
            omega1: rel[2],
            omega2: rel[3],
        });

        time += dt;
    }

    debug!(
        "divergence run finished: {} samples, {} derivative evaluations",
        nstep, nfev
    );

    Ok(DivergenceReport {
        rk4_state: State::from_array(y4),
        rk5_state: State::from_array(y5),
        abs_samples,
        rel_samples,
        abs_totals,
        rel_totals,
        nfev,
        nstep,
    })
}
