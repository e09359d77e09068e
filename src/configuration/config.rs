//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – which integration method to run
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   method: "abm8"          # euler | leapfrog | rk4 | ab4 | ab8 | abm4 | abm8
//!
//! parameters:
//!   t_end: 31536000.0       # total simulated time, seconds
//!   dt: 60.0                # fixed step size, seconds
//!   output_interval: 86400.0  # optional, defaults to dt
//!   g: 6.67428e-11          # optional, defaults to the SI constant
//!   min_separation: 0.1     # optional crash threshold, meters
//!
//! bodies:
//!   - name: "sun"
//!     position: [ 0.0, 0.0, 0.0 ]
//!     velocity: [ 0.0, 0.0, 0.0 ]
//!     mass: 1.989e30
//!     radius: 6.96e8
//!   - name: "earth"
//!     position: [ 1.496e11, 0.0, 0.0 ]
//!     velocity: [ 0.0, 2.978e4, 0.0 ]
//!     mass: 5.972e24
//!     radius: 6.371e6
//! ```
//!
//! All quantities must already be in one consistent unit system; nothing
//! here converts units.

use serde::Deserialize;

use crate::simulation::integrator::Method;

/// Which integration method the engine runs.
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub method: Method,
}

/// Global numerical and physical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64,                  // total simulated time
    pub dt: f64,                     // fixed step size
    pub output_interval: Option<f64>, // snapshot cadence, defaults to dt
    pub g: Option<f64>,              // gravitational constant override
    pub min_separation: Option<f64>, // collision threshold override
}

/// Initial state of a single body.
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub name: Option<String>,
    pub position: Vec<f64>, // 3 components
    pub velocity: Vec<f64>, // 3 components
    pub mass: f64,
    pub radius: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}
