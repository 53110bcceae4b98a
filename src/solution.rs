//! A struct representing the outputted result of a numerical integrator.

use crate::{status::Status, Float};

#[derive(Clone, Debug)]
pub struct Solution {
    pub x: Float,
    pub y: Vec<Float>,
    pub h: Float,
    pub nfev: usize,
    pub nstep: usize,
    pub status: Status,
}
