//! Double pendulum dynamics and fixed-step explicit Runge-Kutta integrators
//! (classical RK4 and a 5th-order method on the Dormand-Prince stage
//! coefficients), with a harness that accumulates their pairwise divergence.

mod args;
mod config;
mod divergence;
mod error;
mod ode;
mod pendulum;
mod solout;
mod solution;
mod status;

pub mod prelude;
pub mod rk;

pub use args::Args;
pub use config::{read_toml, ConfigError, RunConfig};
pub use divergence::{run_divergence, DivergenceArgs, DivergenceReport, ErrorSample};
pub use error::Error;
pub use ode::ODE;
pub use pendulum::{Derivative, DoublePendulum, Params, State};
pub use solout::{ControlFlag, DummySolOut, SolOut};
pub use solution::Solution;
pub use status::Status;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point precision used throughout the crate.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
