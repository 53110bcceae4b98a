//! Convenient prelude: import the most commonly used traits, types, and
//! functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use dpend::prelude::*;
//! ```

pub use crate::rk::{rk4, rk4_step, rk5, rk5_step};
pub use crate::{
    run_divergence, Args, ControlFlag, Derivative, DivergenceArgs, DivergenceReport,
    DoublePendulum, DummySolOut, Error, ErrorSample, Float, Params, SolOut, Solution, State,
    Status, ODE,
};
