//! Rolling derivative history for the multistep methods.

use crate::simulation::states::{NVec3, Universe};

/// The (dx/dt, dv/dt) pair of one body at one past step.
#[derive(Debug, Clone, Copy)]
pub struct DerivativeSample {
    pub velocity: NVec3,
    pub acceleration: NVec3,
}

/// Snapshot of every body's pre-advance derivatives, ordered by universe
/// index. Taken at the top of each multistep update and during bootstrap.
pub fn capture_frame(universe: &Universe) -> Vec<DerivativeSample> {
    universe
        .bodies
        .iter()
        .map(|body| DerivativeSample {
            velocity: body.velocity,
            acceleration: body.acceleration,
        })
        .collect()
}

/// Sliding window of the most recent derivative frames.
///
/// A ring buffer over a fixed arena: once `capacity` frames have been
/// pushed, each further push overwrites the oldest slot instead of
/// allocating, so a long-running simulation reuses the same `capacity`
/// frame vectors forever.
#[derive(Debug, Clone)]
pub struct History {
    frames: Vec<Vec<DerivativeSample>>,
    /// Index of the oldest frame once the arena is full.
    head: usize,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// Number of bodies the stored frames were captured from.
    pub fn frame_width(&self) -> Option<usize> {
        self.frames.first().map(Vec::len)
    }

    /// Append the newest frame. Evicts exactly the oldest frame when the
    /// window is already full, keeping the length invariant.
    pub fn push(&mut self, frame: Vec<DerivativeSample>) {
        if self.frames.len() < self.capacity {
            self.frames.push(frame);
        } else {
            self.frames[self.head] = frame;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Frame by age: `age` 0 is the oldest retained frame, `len() - 1` the
    /// newest.
    pub fn frame(&self, age: usize) -> &[DerivativeSample] {
        debug_assert!(age < self.frames.len());
        &self.frames[(self.head + age) % self.frames.len()]
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.head = 0;
    }
}
