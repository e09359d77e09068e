//! Build fully-initialized simulation runs from configuration.
//!
//! Takes a [`ScenarioConfig`] (YAML-facing) and produces a runtime bundle
//! containing the numerical parameters, the universe at t = 0, and the
//! selected integrator. [`Scenario::run`] is the batch driver: it owns the
//! time counter, steps the integrator to `t_end`, and hands snapshots to a
//! callback at the configured cadence.

use anyhow::{bail, Result};
use log::{debug, info};

use crate::configuration::config::ScenarioConfig;
use crate::error::SimError;
use crate::simulation::forces::{NewtonianGravity, G, MIN_SEPARATION};
use crate::simulation::integrator::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, Universe};

/// A fully-initialized simulation: parameters, universe at t = 0, and the
/// integrator selected by the configuration.
pub struct Scenario {
    pub parameters: Parameters,
    pub universe: Universe,
    pub integrator: Integrator,
}

impl Scenario {
    /// Validate a configuration and map it into the runtime types.
    pub fn build(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = &cfg.parameters;
        if !(p_cfg.dt > 0.0) {
            bail!("parameters.dt must be positive, got {}", p_cfg.dt);
        }
        if p_cfg.t_end < p_cfg.dt {
            bail!(
                "parameters.t_end ({}) is shorter than one step ({})",
                p_cfg.t_end,
                p_cfg.dt
            );
        }

        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            output_interval: p_cfg.output_interval.unwrap_or(p_cfg.dt),
            g: p_cfg.g.unwrap_or(G),
            min_separation: p_cfg.min_separation.unwrap_or(MIN_SEPARATION),
        };

        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            if bc.position.len() != 3 || bc.velocity.len() != 3 {
                bail!("body {i}: position and velocity need exactly 3 components");
            }
            if !(bc.mass > 0.0) {
                bail!("body {i}: mass must be positive, got {}", bc.mass);
            }
            if !(bc.radius > 0.0) {
                bail!("body {i}: radius must be positive, got {}", bc.radius);
            }
            let name = bc
                .name
                .clone()
                .unwrap_or_else(|| format!("body{i}"));
            bodies.push(
                Body::new(
                    NVec3::new(bc.position[0], bc.position[1], bc.position[2]),
                    NVec3::new(bc.velocity[0], bc.velocity[1], bc.velocity[2]),
                    bc.mass,
                    bc.radius,
                )
                .named(name),
            );
        }
        let universe = Universe::new(bodies);

        let gravity = NewtonianGravity {
            g: parameters.g,
            min_separation: parameters.min_separation,
        };
        let integrator = Integrator::with_gravity(cfg.engine.method, gravity);

        info!(
            "scenario: {} bodies, method {}, dt {}, t_end {}",
            universe.len(),
            integrator.method().label(),
            parameters.dt,
            parameters.t_end
        );

        Ok(Self {
            parameters,
            universe,
            integrator,
        })
    }

    /// Run to `t_end`, reporting `(time, universe)` snapshots every
    /// `output_interval` of simulated time (the state before the next step,
    /// starting with the initial one).
    pub fn run(&mut self, mut on_snapshot: impl FnMut(f64, &Universe)) -> Result<(), SimError> {
        let dt = self.parameters.dt;
        let steps = (self.parameters.t_end / dt) as u64;
        let mut snapshot_every = (self.parameters.output_interval / dt) as u64;
        if snapshot_every < 1 {
            snapshot_every = 1;
        }

        let mut time = 0.0;
        for i in 0..=steps {
            if i % snapshot_every == 0 {
                on_snapshot(time, &self.universe);
            }
            self.integrator.step(&mut self.universe, dt)?;
            time += dt;
        }
        debug!(
            "finished after {} steps, history frames held: {}",
            steps + 1,
            self.integrator.history_len()
        );
        Ok(())
    }
}
