//! TOML run configuration for the companion binary.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    pendulum::{Params, State},
    Float,
};

const HALF_PI: Float = std::f64::consts::FRAC_PI_2 as Float;

/// Run configuration, read from an optional TOML file.
///
/// Every field falls back to the conventional study setup when absent: unit
/// masses and rod lengths, `g = 9.81`, `dt = 0.01`, a 10-unit horizon, and
/// both pendulums raised to the horizontal with the second one's `omega2`
/// perturbed by `0.001`.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Physical parameters shared by both pendulums.
    pub params: Params,
    /// Fixed step size.
    pub dt: Float,
    /// Divergence horizon.
    pub horizon: Float,
    /// Initial conditions of the first pendulum.
    pub initial1: State,
    /// Initial conditions of the second pendulum.
    pub initial2: State,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            params: Params::default(),
            dt: 0.01,
            horizon: 10.0,
            initial1: State::new(HALF_PI, HALF_PI, 0.0, 0.0),
            initial2: State::new(HALF_PI, HALF_PI, 0.0, 0.001),
        }
    }
}

/// Errors reading a [`RunConfig`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read a [`RunConfig`] from a TOML file.
pub fn read_toml<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let contents = read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: RunConfig = toml::from_str("").unwrap();
        assert_eq!(config.dt, 0.01);
        assert_eq!(config.horizon, 10.0);
        assert_eq!(config.params, Params::default());
        assert_eq!(config.initial2.omega2, 0.001);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: RunConfig = toml::from_str(
            "dt = 0.005\n\n[params]\ng = 1.62\n\n[initial1]\ntheta1 = 1.0\n",
        )
        .unwrap();
        assert_eq!(config.dt, 0.005);
        assert_eq!(config.params.g, 1.62);
        assert_eq!(config.params.m1, 1.0);
        assert_eq!(config.initial1.theta1, 1.0);
        assert_eq!(config.initial1.theta2, 0.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<RunConfig>("gravity = 9.81\n").is_err());
    }
}
