//! Fixed-step explicit Runge-Kutta integrators (RK4, RK5)

mod rk4;
mod rk5;

pub use rk4::{rk4, rk4_step};
pub use rk5::{rk5, rk5_step};
