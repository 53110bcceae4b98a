//! Args for the fixed-step drivers.

use bon::Builder;

use crate::solout::{DummySolOut, SolOut};

#[derive(Builder)]
/// Args for the fixed-step drivers
pub struct Args<S: SolOut = DummySolOut> {
    /// Solution output callback invoked after each step
    pub solout: Option<S>,
    /// Maximum number of allowed steps. Default is 100,000.
    #[builder(default = 100_000)]
    pub nmax: usize,
}

impl Default for Args<DummySolOut> {
    fn default() -> Self {
        Self {
            solout: None,
            nmax: 100_000,
        }
    }
}
