//! Double pendulum model: physical parameters, state, and the coupled
//! equations of motion.

use serde::Deserialize;

use crate::{Float, ODE};

/// Physical parameters shared by both simulated pendulums: point masses,
/// rod lengths, and gravitational acceleration.
///
/// Fixed for the lifetime of a run and passed explicitly into the dynamics
/// rather than held as global state, so stepper calls stay deterministic and
/// independently testable.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Mass of the first bob.
    pub m1: Float,
    /// Mass of the second bob.
    pub m2: Float,
    /// Length of the first rod.
    pub l1: Float,
    /// Length of the second rod.
    pub l2: Float,
    /// Gravitational acceleration.
    pub g: Float,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            m1: 1.0,
            m2: 1.0,
            l1: 1.0,
            l2: 1.0,
            g: 9.81,
        }
    }
}

/// Instantaneous configuration of one double pendulum.
///
/// Angles are in radians, measured from the downward vertical, and are never
/// normalized into a canonical range (they may grow unbounded). Angular
/// velocities are in radians per unit time. Each simulated pendulum owns
/// exactly one `State`; the steppers consume and produce whole values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct State {
    pub theta1: Float,
    pub theta2: Float,
    pub omega1: Float,
    pub omega2: Float,
}

impl State {
    pub fn new(theta1: Float, theta2: Float, omega1: Float, omega2: Float) -> Self {
        Self {
            theta1,
            theta2,
            omega1,
            omega2,
        }
    }

    /// Slice layout used by the steppers: `[theta1, theta2, omega1, omega2]`.
    pub fn to_array(self) -> [Float; 4] {
        [self.theta1, self.theta2, self.omega1, self.omega2]
    }

    pub fn from_array(y: [Float; 4]) -> Self {
        Self {
            theta1: y[0],
            theta2: y[1],
            omega1: y[2],
            omega2: y[3],
        }
    }

    /// True when all four fields are finite.
    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.theta2.is_finite()
            && self.omega1.is_finite()
            && self.omega2.is_finite()
    }
}

/// Time-derivative of a [`State`], produced by one stage evaluation and
/// consumed within the same stepper call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivative {
    pub dtheta1: Float,
    pub dtheta2: Float,
    pub domega1: Float,
    pub domega2: Float,
}

/// The coupled two-body pendulum system.
///
/// Implements [`ODE`] over the four-slot state layout so the generic
/// steppers can drive it, and exposes a typed [`derivative`](Self::derivative)
/// for direct evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoublePendulum {
    pub params: Params,
}

impl DoublePendulum {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Instantaneous time-derivative of `state`.
    ///
    /// Pure and deterministic. The denominators vanish only where
    /// `cos(theta2 - theta1)` reaches ±1 in a degenerate mass/length
    /// configuration; the resulting non-finite values are propagated to the
    /// caller, not intercepted.
    pub fn derivative(&self, state: &State) -> Derivative {
        let mut dydx = [0.0; 4];
        self.ode(0.0, &state.to_array(), &mut dydx);
        Derivative {
            dtheta1: dydx[0],
            dtheta2: dydx[1],
            domega1: dydx[2],
            domega2: dydx[3],
        }
    }

    /// Planar bob positions `(x1, y1, x2, y2)` for a state, with the pivot at
    /// the origin and y pointing down along gravity.
    pub fn bob_positions(&self, state: &State) -> (Float, Float, Float, Float) {
        let Params { l1, l2, .. } = self.params;
        let x1 = l1 * state.theta1.sin();
        let y1 = l1 * state.theta1.cos();
        let x2 = x1 + l2 * state.theta2.sin();
        let y2 = y1 + l2 * state.theta2.cos();
        (x1, y1, x2, y2)
    }
}

impl ODE for DoublePendulum {
    // Operand order and grouping are kept exactly as written; the divergence
    // totals are sensitive to floating-point association.
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        let Params { m1, m2, l1, l2, g } = self.params;
        let (theta1, theta2, omega1, omega2) = (y[0], y[1], y[2], y[3]);
        let delta = theta2 - theta1;

        dydx[0] = omega1;
        dydx[1] = omega2;

        dydx[2] = m2 * l1 * omega1 * omega1 * delta.sin() * delta.cos()
            + m2 * g * theta2.sin() * delta.cos()
            + m2 * l2 * omega2 * omega2 * delta.sin()
            - (m1 + m2) * g * theta1.sin();
        dydx[2] /= (m1 + m2) * l1 - m2 * l1 * delta.cos() * delta.cos();

        dydx[3] = -m2 * l2 * omega2 * omega2 * delta.sin() * delta.cos()
            + (m1 + m2)
                * (g * theta1.sin() * delta.cos()
                    - l1 * omega1 * omega1 * delta.sin()
                    - g * theta2.sin());
        dydx[3] /= (m1 + m2) * l2 - m2 * l2 * delta.cos() * delta.cos();
    }
}
