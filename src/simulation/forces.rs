//! Newtonian gravity for the N-body engine.
//!
//! Direct pairwise summation, O(n^2) per sweep. Target universes hold
//! tens of bodies, so the quadratic cost is accepted and no tree or mesh
//! approximation is layered on top.

use crate::error::SimError;
use crate::simulation::states::{NVec3, Universe};

/// Gravitational constant, in m^3 kg^-1 s^-2.
pub const G: f64 = 6.67428e-11;

/// Two bodies closer than this are treated as crashed; the force would
/// blow up rather than mean anything physical.
pub const MIN_SEPARATION: f64 = 0.1;

/// Newtonian point-mass gravity.
///
/// `min_separation` is an absolute distance in the same length unit as the
/// body positions. Loaders working in units other than meters should scale
/// it along with the rest of the scenario.
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub g: f64,
    pub min_separation: f64,
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: G,
            min_separation: MIN_SEPARATION,
        }
    }
}

impl NewtonianGravity {
    /// Acceleration of body `index` as if it sat at `position`.
    ///
    /// Sums `-g * m_j * (p - p_j) / |p - p_j|^3` over every other body j.
    /// `position` may differ from the stored position; the multistage
    /// schemes evaluate the field at shifted and predicted points. Fails
    /// with [`SimError::Collision`] when any pair distance drops below
    /// `min_separation`.
    ///
    /// Careful when some of the other bodies already carry their advanced
    /// positions: the sum uses whatever is stored, which mid-update is a
    /// mix of old and new state.
    pub fn acceleration_of(
        &self,
        universe: &Universe,
        index: usize,
        position: &NVec3,
    ) -> Result<NVec3, SimError> {
        let mut sum = NVec3::zeros();
        for (j, other) in universe.bodies.iter().enumerate() {
            if j == index {
                continue;
            }
            let offset = position - other.position;
            let distance = offset.norm();
            if distance < self.min_separation {
                return Err(SimError::Collision {
                    first: index,
                    second: j,
                    distance,
                    limit: self.min_separation,
                });
            }
            sum += other.mass * offset / distance.powi(3);
        }
        Ok(sum * (-self.g))
    }

    /// Evaluate every body at its own position and write the result into
    /// its `acceleration` field.
    ///
    /// Call exactly once per step, before any position has been advanced.
    /// After partial updates the sum mixes time levels and the step is
    /// silently wrong.
    pub fn acceleration_of_all(&self, universe: &mut Universe) -> Result<(), SimError> {
        for i in 0..universe.bodies.len() {
            let position = universe.bodies[i].position;
            let acceleration = self.acceleration_of(universe, i, &position)?;
            universe.bodies[i].acceleration = acceleration;
        }
        Ok(())
    }
}
