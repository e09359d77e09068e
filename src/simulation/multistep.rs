//! Adams-Bashforth and Adams-Bashforth-Moulton linear multistep updates.
//!
//! Both methods consume a window of the last `order - 1` derivative
//! frames plus the current (not yet advanced) state. Until the window is
//! full each step is delegated to a Runge-Kutta 4 advance while the
//! pre-advance frame is recorded, so the first `order - 1` frames are
//! RK4-quality samples.

use crate::error::SimError;
use crate::simulation::constants::AdamsTables;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::history::{capture_frame, History};
use crate::simulation::integrator::rk4_advance;
use crate::simulation::states::{NVec3, Universe};

/// Shared state of the explicit and predictor-corrector Adams methods.
pub(crate) struct Multistep {
    order: usize,
    tables: AdamsTables,
    history: History,
}

impl Multistep {
    pub(crate) fn order4() -> Self {
        Self::from_tables(AdamsTables::order4())
    }

    pub(crate) fn order8() -> Self {
        Self::from_tables(AdamsTables::order8())
    }

    fn from_tables(tables: AdamsTables) -> Self {
        let order = tables.order();
        Self {
            order,
            tables,
            history: History::new(order - 1),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.history.clear();
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Bootstrap handling shared by both methods. Returns `true` when this
    /// step was taken by the bootstrap RK4 and the Adams formula must not
    /// run.
    ///
    /// Frames recorded from a structurally different universe are useless;
    /// a body-count mismatch drops them and restarts the bootstrap.
    fn bootstrap_step(
        &mut self,
        gravity: &NewtonianGravity,
        universe: &mut Universe,
        dt: f64,
    ) -> Result<bool, SimError> {
        if self
            .history
            .frame_width()
            .is_some_and(|width| width != universe.len())
        {
            self.history.clear();
        }
        if self.history.len() < self.order - 1 {
            let frame = capture_frame(universe);
            rk4_advance(gravity, universe, dt)?;
            self.history.push(frame);
            return Ok(true);
        }
        Ok(false)
    }

    /// Weighted Bashforth sums of the velocity and acceleration samples
    /// for body `index`: the retained history oldest-to-newest, plus the
    /// current pre-advance state under the index-0 coefficient.
    fn bashforth_sums(
        &self,
        universe: &Universe,
        index: usize,
    ) -> Result<(NVec3, NVec3), SimError> {
        let mut sum_velocity = NVec3::zeros();
        let mut sum_acceleration = NVec3::zeros();
        for age in 0..self.order - 1 {
            let weight = self.tables.bashforth(self.order - 1 - age)?;
            let sample = &self.history.frame(age)[index];
            sum_velocity += weight * sample.velocity;
            sum_acceleration += weight * sample.acceleration;
        }
        let body = &universe.bodies[index];
        let newest = self.tables.bashforth(0)?;
        sum_velocity += newest * body.velocity;
        sum_acceleration += newest * body.acceleration;
        Ok((sum_velocity, sum_acceleration))
    }

    /// Explicit Adams-Bashforth step.
    pub(crate) fn advance_explicit(
        &mut self,
        gravity: &NewtonianGravity,
        universe: &mut Universe,
        dt: f64,
    ) -> Result<(), SimError> {
        if self.bootstrap_step(gravity, universe, dt)? {
            return Ok(());
        }

        let frame = capture_frame(universe);
        let scale = dt * self.tables.divisor();
        for i in 0..universe.bodies.len() {
            let (sum_velocity, sum_acceleration) = self.bashforth_sums(universe, i)?;
            let body = &mut universe.bodies[i];
            body.position += scale * sum_velocity;
            body.velocity += scale * sum_acceleration;
        }
        self.history.push(frame);
        Ok(())
    }

    /// Adams-Bashforth-Moulton step: the Bashforth sums give a predicted
    /// position and velocity, which feed the Moulton corrector's newest
    /// term; the corrector's own update is what lands on the body.
    pub(crate) fn advance_corrected(
        &mut self,
        gravity: &NewtonianGravity,
        universe: &mut Universe,
        dt: f64,
    ) -> Result<(), SimError> {
        if self.bootstrap_step(gravity, universe, dt)? {
            return Ok(());
        }

        let frame = capture_frame(universe);
        let scale = dt * self.tables.divisor();
        for i in 0..universe.bodies.len() {
            let (sum_velocity, sum_acceleration) = self.bashforth_sums(universe, i)?;
            let predicted_position = universe.bodies[i].position + scale * sum_velocity;
            let predicted_velocity = universe.bodies[i].velocity + scale * sum_acceleration;

            // Moulton window: one sample shorter at the old end than the
            // Bashforth one; the freed index-0 slot weights the predicted
            // state instead.
            let mut sum_velocity = NVec3::zeros();
            let mut sum_acceleration = NVec3::zeros();
            for age in 1..self.order - 1 {
                let weight = self.tables.moulton(self.order - age)?;
                let sample = &self.history.frame(age)[i];
                sum_velocity += weight * sample.velocity;
                sum_acceleration += weight * sample.acceleration;
            }

            let body = &universe.bodies[i];
            sum_velocity += self.tables.moulton(1)? * body.velocity;
            sum_velocity += self.tables.moulton(0)? * predicted_velocity;

            sum_acceleration += self.tables.moulton(1)? * body.acceleration;
            sum_acceleration +=
                self.tables.moulton(0)? * gravity.acceleration_of(universe, i, &predicted_position)?;

            let body = &mut universe.bodies[i];
            body.position += scale * sum_velocity;
            body.velocity += scale * sum_acceleration;
        }
        self.history.push(frame);
        Ok(())
    }
}
