//! Numerical and physical parameters for a simulation run.

/// Runtime settings the driver and force model are built from.
#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64,           // total simulated time
    pub dt: f64,              // fixed step size
    pub output_interval: f64, // simulated time between snapshots
    pub g: f64,               // gravitational constant
    pub min_separation: f64,  // collision threshold
}
