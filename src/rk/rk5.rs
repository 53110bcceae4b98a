//! Fifth-order fixed-step Runge-Kutta integrator built on the
//! Dormand-Prince stage coefficients.
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).
//!
//! The tableau is the canonical Dormand-Prince 5(4) one, but only the
//! fifth-order update is formed: the embedded fourth-order estimate and the
//! step-size controller that normally accompany it are never computed, so
//! the method runs as a plain fixed-step formula.

use crate::{
    args::Args, error::Error, solution::Solution, status::Status, ControlFlag, Float, ODE, SolOut,
};

/// Advance `y` at abscissa `x` by one 5th-order step of size `h`, writing
/// the result into `yout`.
///
/// Seven derivative evaluations against the Dormand-Prince tableau. The
/// update reuses the weights of the 7th stage's input; the 7th stage itself
/// is evaluated and discarded. No error estimate or step-size correction is
/// produced.
pub fn rk5_step<F: ODE>(f: &F, x: Float, y: &[Float], h: Float, yout: &mut [Float]) {
    let n = y.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut k7 = vec![0.0; n];
    let mut yt = vec![0.0; n];

    f.ode(x, y, &mut k1);

    // Stage 2
    for i in 0..n {
        yt[i] = y[i] + h * A21 * k1[i];
    }
    f.ode(x + C2 * h, &yt, &mut k2);

    // Stage 3
    for i in 0..n {
        yt[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
    }
    f.ode(x + C3 * h, &yt, &mut k3);

    // Stage 4
    for i in 0..n {
        yt[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
    }
    f.ode(x + C4 * h, &yt, &mut k4);

    // Stage 5
    for i in 0..n {
        yt[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
    }
    f.ode(x + C5 * h, &yt, &mut k5);

    // Stage 6
    for i in 0..n {
        yt[i] = y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
    }
    let xph = x + h;
    f.ode(xph, &yt, &mut k6);

    // Stage 7 input doubles as the 5th-order update (A72 is zero and
    // omitted).
    for i in 0..n {
        yout[i] =
            y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
    }

    // Stage 7: evaluated, never used in the update.
    f.ode(xph, yout, &mut k7);
}

/// Fifth-order fixed-step driver on the Dormand-Prince coefficients.
///
/// Integrates from `x` to `xend` in fixed increments of `h`, shortening the
/// final step to land exactly on `xend`. The optional [`SolOut`] callback is
/// invoked once at the initial point and after every step.
pub fn rk5<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &[Float],
    h: Float,
    args: Args<S>,
) -> Result<Solution, Error>
where
    F: ODE,
    S: SolOut,
{
    // --- Input Validation ---

    // Callback function
    let mut solout = args.solout;

    if h == 0.0 || !h.is_finite() {
        return Err(Error::InvalidStepSize(h));
    }

    let direction = (xend - x).signum();
    if h.signum() != direction {
        return Err(Error::InvalidStepSize(h));
    }

    // --- Declarations ---
    let n = y.len();
    let mut y = y.to_vec();
    let mut yt = vec![0.0; n];
    let mut nfev = 0;
    let mut nstep = 0;
    let mut status = Status::Success;
    let mut xold;
    let nmax = args.nmax;

    // --- Initializations ---
    if let Some(s) = solout.as_mut() {
        if let ControlFlag::Interrupt = s.solout(x, x, &y) {
            return Ok(Solution {
                x,
                y,
                h,
                nfev,
                nstep,
                status: Status::Interrupted,
            });
        }
    }

    // --- Main integration loop ---
    loop {
        // Check for maximum number of steps
        if nstep >= nmax {
            status = Status::NeedLargerNmax;
            break;
        }

        // Adjust last step so we land exactly on xend
        let mut hs = h;
        let mut last = false;
        if (x + 1.01 * h - xend) * direction > 0.0 {
            hs = xend - x;
            last = true;
        }

        rk5_step(f, x, &y, hs, &mut yt);

        // Update state
        xold = x;
        x += hs;
        y.copy_from_slice(&yt);
        nfev += 7;
        nstep += 1;

        // Optional callback function
        if let Some(s) = solout.as_mut() {
            if let ControlFlag::Interrupt = s.solout(xold, x, &y) {
                status = Status::Interrupted;
                break;
            }
        }

        if last {
            break;
        }
    }

    Ok(Solution {
        x,
        y,
        h,
        nfev,
        nstep,
        status,
    })
}

// Dormand-Prince Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

#[cfg(test)]
mod tests {
    use super::*;

    // A handful of f64 sums accumulate a few ulps of roundoff.
    const TOL: Float = 1e-12;

    #[test]
    fn stage_rows_sum_to_nodes() {
        assert!((A21 - C2).abs() < TOL);
        assert!((A31 + A32 - C3).abs() < TOL);
        assert!((A41 + A42 + A43 - C4).abs() < TOL);
        assert!((A51 + A52 + A53 + A54 - C5).abs() < TOL);
        assert!((A61 + A62 + A63 + A64 + A65 - 1.0).abs() < TOL);
    }

    #[test]
    fn update_weights_sum_to_one() {
        assert!((A71 + A73 + A74 + A75 + A76 - 1.0).abs() < TOL);
    }
}
