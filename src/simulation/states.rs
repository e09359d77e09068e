//! Core state types for the N-body simulation.
//!
//! A [`Universe`] is the ordered list of bodies at one instant; the index
//! of a body in that list is its identity for the lifetime of a run.

use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

/// One body, defined by its position and velocity plus everything the
/// integration engine needs to know about it.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: NVec3,
    pub velocity: NVec3,
    /// Per-step cache, written by the force sweep at the start of every
    /// step. Stale between steps; never read across a step boundary.
    pub acceleration: NVec3,
    pub mass: f64,
    /// Physical radius, used by loaders and output layers.
    pub radius: f64,
    /// Label used by the driver when printing snapshots.
    pub name: String,
}

impl Body {
    pub fn new(position: NVec3, velocity: NVec3, mass: f64, radius: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration: NVec3::zeros(),
            mass,
            radius,
            name: String::from("body"),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(NVec3::zeros(), NVec3::zeros(), 1.0, 1.0)
    }
}

/// All bodies with their positions and velocities at one point of time.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub bodies: Vec<Body>,
}

impl Universe {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Mass-weighted mean position. `None` for an empty universe or zero
    /// total mass.
    pub fn barycenter(&self) -> Option<NVec3> {
        let total: f64 = self.bodies.iter().map(|b| b.mass).sum();
        if total > 0.0 {
            let sum: NVec3 = self.bodies.iter().map(|b| b.position * b.mass).sum();
            Some(sum / total)
        } else {
            None
        }
    }
}
