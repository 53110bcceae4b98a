//! Classic explicit Runge-Kutta 4 (RK4) fixed-step integrator.

use crate::{
    args::Args, error::Error, solution::Solution, status::Status, ControlFlag, Float, ODE, SolOut,
};

/// Advance `y` at abscissa `x` by one RK4 step of size `h`, writing the
/// result into `yout`.
///
/// Four derivative evaluations combined with the classical weights,
/// component-wise over whatever dimension the ODE fills. No error estimate
/// is produced.
pub fn rk4_step<F: ODE>(f: &F, x: Float, y: &[Float], h: Float, yout: &mut [Float]) {
    let n = y.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];

    f.ode(x, y, &mut k1);

    for i in 0..n {
        yt[i] = y[i] + h * A21 * k1[i];
    }
    f.ode(x + C2 * h, &yt, &mut k2);

    for i in 0..n {
        yt[i] = y[i] + h * A32 * k2[i];
    }
    f.ode(x + C3 * h, &yt, &mut k3);

    for i in 0..n {
        yt[i] = y[i] + h * A43 * k3[i];
    }
    f.ode(x + C4 * h, &yt, &mut k4);

    for i in 0..n {
        yout[i] = y[i] + h * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
    }
}

/// Classical explicit Runge-Kutta 4 (RK4) fixed-step driver.
///
/// Integrates from `x` to `xend` in fixed increments of `h`, shortening the
/// final step to land exactly on `xend`. The optional [`SolOut`] callback is
/// invoked once at the initial point and after every step.
pub fn rk4<F, S>(
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

        rk4_step(f, x, &y, hs, &mut yt);

        // Update state
        xold = x;
        x += hs;
        y.copy_from_slice(&yt);
        nfev += 4;
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

// Classical RK4 stage coefficients; the 1/6 (1, 2, 2, 1) combination is
// written out in the update itself.
const C2: Float = 0.5;
const C3: Float = 0.5;
const C4: Float = 1.0;
const A21: Float = 0.5;
const A32: Float = 0.5;
const A43: Float = 1.0;
