//! User defined callback hook executed after each step.

use crate::Float;

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each step.
///
/// `SolOut` is intended for user code that wants to observe the solution as
/// a driver progresses. The callback is invoked once before the main loop
/// (with `xold == x`) and after every step. The arguments are:
/// - `xold`: the previous abscissa (left end of the last step),
/// - `x`: the new abscissa after the step (xold + h),
/// - `y`: the driver's current solution at `x`.
///
/// Typical uses: print or log the solution at each step, stream it to a
/// file, or watch for a condition and return `ControlFlag::Interrupt` to
/// hand control back to the caller.
pub trait SolOut {
    fn solout(&mut self, xold: Float, x: Float, y: &[Float]) -> ControlFlag;
}

/// No-op [`SolOut`] used when a driver runs without a callback.
pub struct DummySolOut;

impl SolOut for DummySolOut {
    fn solout(&mut self, _xold: Float, _x: Float, _y: &[Float]) -> ControlFlag {
        ControlFlag::Continue
    }
}
