//! Timing sweeps for the force evaluation and the integrators.
//!
//! Not wired into a bench harness; these print to stdout and are invoked
//! from the CLI with `--bench` to get quick numbers on a given machine.

use std::time::Instant;

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{Integrator, Method};
use crate::simulation::states::{Body, NVec3, Universe};

/// Deterministic scatter of `n` unit-mass bodies, no rand needed.
fn scattered_universe(n: usize) -> Universe {
    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let i_f = i as f64;
        let position = NVec3::new(
            (i_f * 0.37).sin() * 5.0e3,
            (i_f * 0.13).cos() * 5.0e3,
            (i_f * 0.07).sin() * 5.0e3,
        );
        bodies.push(Body::new(position, NVec3::zeros(), 1.0, 1.0));
    }
    Universe::new(bodies)
}

/// Time the direct O(n^2) acceleration sweep for a range of body counts.
pub fn bench_gravity() -> Result<(), SimError> {
    let ns = [50, 100, 200, 400, 800, 1600];
    let gravity = NewtonianGravity::default();

    for n in ns {
        let mut universe = scattered_universe(n);

        // Warm up
        gravity.acceleration_of_all(&mut universe)?;

        let t0 = Instant::now();
        gravity.acceleration_of_all(&mut universe)?;
        let elapsed = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, direct sweep = {elapsed:9.6} s");
    }
    Ok(())
}

/// Time whole integrator steps for every method on one body count.
pub fn bench_methods() -> Result<(), SimError> {
    let n = 200;
    let steps = 20;
    let dt = 1.0;

    for method in Method::ALL {
        let mut universe = scattered_universe(n);
        let mut integrator = Integrator::new(method);

        // Warm up; also fills multistep history past the bootstrap phase
        for _ in 0..8 {
            integrator.step(&mut universe, dt)?;
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            integrator.step(&mut universe, dt)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {n}, {:28} = {per_step:9.6} s/step",
            integrator.method().label()
        );
    }
    Ok(())
}
