//! Fixed-step time integrators for the N-body system.
//!
//! All methods share one step contract: accelerations for the whole
//! universe are computed exactly once from the not-yet-advanced positions,
//! then the scheme-specific update runs. Schemes are free to re-evaluate
//! the field at shifted or predicted positions for single bodies, but the
//! whole-universe sweep happens only at the top of [`Integrator::step`].
//! Mixing the two produces silently wrong trajectories.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::multistep::Multistep;
use crate::simulation::states::Universe;

/// Identifier of a concrete integration method.
///
/// The serde spellings double as the method keys accepted by [`factory`]
/// and the `engine.method` field of scenario files.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    #[serde(rename = "euler")]
    Euler,
    #[serde(rename = "leapfrog")]
    Leapfrog,
    #[serde(rename = "rk4")]
    Rk4,
    #[serde(rename = "ab4")]
    Ab4,
    #[serde(rename = "ab8")]
    Ab8,
    #[serde(rename = "abm4")]
    Abm4,
    #[serde(rename = "abm8")]
    Abm8,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Euler,
        Method::Leapfrog,
        Method::Rk4,
        Method::Ab4,
        Method::Ab8,
        Method::Abm4,
        Method::Abm8,
    ];

    /// Short key, as used in scenario files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Leapfrog => "leapfrog",
            Method::Rk4 => "rk4",
            Method::Ab4 => "ab4",
            Method::Ab8 => "ab8",
            Method::Abm4 => "abm4",
            Method::Abm8 => "abm8",
        }
    }

    /// Human-readable name for UI and log output.
    pub fn label(self) -> &'static str {
        match self {
            Method::Euler => "Euler Method",
            Method::Leapfrog => "Leapfrog",
            Method::Rk4 => "Runge-Kutta 4",
            Method::Ab4 => "Adams-Bashforth 4",
            Method::Ab8 => "Adams-Bashforth 8",
            Method::Abm4 => "Adams predictor-corrector 4",
            Method::Abm8 => "Adams predictor-corrector 8",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Method {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| SimError::UnknownMethod(s.to_owned()))
    }
}

/// Construct a ready-to-use integrator (empty history, default SI gravity)
/// from a method key.
pub fn factory(name: &str) -> Result<Integrator, SimError> {
    Ok(Integrator::new(name.parse()?))
}

/// Scheme-specific state behind the shared step contract. Closed set; a
/// match per operation replaces a virtual-dispatch hierarchy.
enum Scheme {
    Euler,
    Leapfrog,
    RungeKutta4,
    AdamsBashforth(Multistep),
    AdamsBashforthMoulton(Multistep),
}

/// A numeric integrator bound to one force model.
///
/// ```no_run
/// use gravsim::simulation::integrator::{Integrator, Method};
/// use gravsim::simulation::states::Universe;
///
/// let mut universe = Universe::default(); // filled by a loader
/// let mut integrator = Integrator::new(Method::Rk4);
/// let dt = 60.0;
/// for _ in 0..100 {
///     integrator.step(&mut universe, dt)?;
/// }
/// // switching methods mid-run: build a new instance, keep the universe
/// let mut integrator = Integrator::new(Method::Abm8);
/// integrator.step(&mut universe, dt)?;
/// # Ok::<(), gravsim::error::SimError>(())
/// ```
pub struct Integrator {
    method: Method,
    gravity: NewtonianGravity,
    scheme: Scheme,
}

impl Integrator {
    pub fn new(method: Method) -> Self {
        Self::with_gravity(method, NewtonianGravity::default())
    }

    /// Integrator with a non-default force model (unit systems other than
    /// SI, scaled collision threshold, test setups).
    pub fn with_gravity(method: Method, gravity: NewtonianGravity) -> Self {
        let scheme = match method {
            Method::Euler => Scheme::Euler,
            Method::Leapfrog => Scheme::Leapfrog,
            Method::Rk4 => Scheme::RungeKutta4,
            Method::Ab4 => Scheme::AdamsBashforth(Multistep::order4()),
            Method::Ab8 => Scheme::AdamsBashforth(Multistep::order8()),
            Method::Abm4 => Scheme::AdamsBashforthMoulton(Multistep::order4()),
            Method::Abm8 => Scheme::AdamsBashforthMoulton(Multistep::order8()),
        };
        Self {
            method,
            gravity,
            scheme,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Advance the universe by one step of `dt`.
    ///
    /// No-op for an empty universe. Otherwise runs the whole-universe
    /// force sweep once, then the scheme update. On error the universe may
    /// be left partially advanced; there is no rollback.
    pub fn step(&mut self, universe: &mut Universe, dt: f64) -> Result<(), SimError> {
        if universe.is_empty() {
            return Ok(());
        }
        self.gravity.acceleration_of_all(universe)?;
        match &mut self.scheme {
            Scheme::Euler => {
                euler_advance(universe, dt);
                Ok(())
            }
            Scheme::Leapfrog => leapfrog_advance(&self.gravity, universe, dt),
            Scheme::RungeKutta4 => rk4_advance(&self.gravity, universe, dt),
            Scheme::AdamsBashforth(multistep) => {
                multistep.advance_explicit(&self.gravity, universe, dt)
            }
            Scheme::AdamsBashforthMoulton(multistep) => {
                multistep.advance_corrected(&self.gravity, universe, dt)
            }
        }
    }

    /// Drop state tied to the current universe. Call when loading a new
    /// universe, or after any structural change (body count, reordering),
    /// under the same integrator instance. Idempotent.
    pub fn reset(&mut self) {
        match &mut self.scheme {
            Scheme::AdamsBashforth(multistep) | Scheme::AdamsBashforthMoulton(multistep) => {
                multistep.reset();
            }
            _ => {}
        }
    }

    /// Number of derivative frames currently held for multistep
    /// bootstrapping. Always 0 for single-step methods; reaches order - 1
    /// once an Adams method leaves its bootstrap phase.
    pub fn history_len(&self) -> usize {
        match &self.scheme {
            Scheme::AdamsBashforth(multistep) | Scheme::AdamsBashforthMoulton(multistep) => {
                multistep.history_len()
            }
            _ => 0,
        }
    }
}

/// Forward Euler, order 1. Baseline method: one force sweep, no history.
fn euler_advance(universe: &mut Universe, dt: f64) {
    for body in &mut universe.bodies {
        body.position += dt * body.velocity;
        body.velocity += dt * body.acceleration;
    }
}

/// Leapfrog, order 2. Taylor half-step for the position, then the velocity
/// is kicked by the average of the old acceleration and a fresh evaluation
/// at the advanced position.
fn leapfrog_advance(
    gravity: &NewtonianGravity,
    universe: &mut Universe,
    dt: f64,
) -> Result<(), SimError> {
    for i in 0..universe.bodies.len() {
        let body = &universe.bodies[i];
        let old_acceleration = body.acceleration;
        let position = body.position + dt * body.velocity + 0.5 * dt * dt * old_acceleration;
        universe.bodies[i].position = position;

        let new_acceleration = gravity.acceleration_of(universe, i, &position)?;
        universe.bodies[i].velocity += 0.5 * dt * (old_acceleration + new_acceleration);
    }
    Ok(())
}

/// Classic four-stage Runge-Kutta, order 4.
///
/// Each body is advanced independently; stages 2-4 re-evaluate the field
/// at positions shifted by the previous stage's slope. Three extra force
/// evaluations per body per step. Also the workhorse behind multistep
/// bootstrap: the `(k1, l1)` pair is exactly the body's pre-advance
/// derivative sample.
pub(crate) fn rk4_advance(
    gravity: &NewtonianGravity,
    universe: &mut Universe,
    dt: f64,
) -> Result<(), SimError> {
    let h = dt;
    for i in 0..universe.bodies.len() {
        let position = universe.bodies[i].position;
        let velocity = universe.bodies[i].velocity;

        let k1 = velocity;
        let l1 = universe.bodies[i].acceleration;

        let k2 = velocity + h * l1 / 2.0;
        let l2 = gravity.acceleration_of(universe, i, &(position + h * k1 / 2.0))?;

        let k3 = velocity + h * l2 / 2.0;
        let l3 = gravity.acceleration_of(universe, i, &(position + h * k2 / 2.0))?;

        let k4 = velocity + h * l3;
        let l4 = gravity.acceleration_of(universe, i, &(position + h * k3))?;

        let k = (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
        let l = (l1 + 2.0 * l2 + 2.0 * l3 + l4) / 6.0;

        let body = &mut universe.bodies[i];
        body.position += h * k;
        body.velocity += h * l;
    }
    Ok(())
}
