//! Coefficient tables for the Adams family of linear multistep methods.

use crate::error::SimError;

// Order 8.
const BASHFORTH_8: [f64; 8] = [
    434241.0, -1152169.0, 2183877.0, -2664477.0, 2102243.0, -1041723.0, 295767.0, -36799.0,
];
const MOULTON_8: [f64; 8] = [
    36799.0, 139849.0, -121797.0, 123133.0, -88547.0, 41499.0, -11351.0, 1375.0,
];
const DIVISOR_8: f64 = 1.0 / 120960.0;

// Order 4.
const BASHFORTH_4: [f64; 4] = [55.0, -59.0, 37.0, -9.0];
const MOULTON_4: [f64; 4] = [9.0, 19.0, -5.0, 1.0];
const DIVISOR_4: f64 = 1.0 / 24.0;

/// Adams-Bashforth and Adams-Moulton coefficients of one order, with the
/// divisor both rows share.
///
/// Index 0 weights the newest term (the current sample for Bashforth, the
/// predicted one for Moulton); higher indices weight progressively older
/// samples.
#[derive(Debug, Clone)]
pub struct AdamsTables {
    bashforth: &'static [f64],
    moulton: &'static [f64],
    divisor: f64,
    order: usize,
}

impl AdamsTables {
    /// Tables for the given order. Only 4 and 8 exist.
    pub fn new(order: usize) -> Result<Self, SimError> {
        match order {
            4 => Ok(Self::order4()),
            8 => Ok(Self::order8()),
            other => Err(SimError::UnsupportedOrder(other)),
        }
    }

    pub fn order4() -> Self {
        Self {
            bashforth: &BASHFORTH_4,
            moulton: &MOULTON_4,
            divisor: DIVISOR_4,
            order: 4,
        }
    }

    pub fn order8() -> Self {
        Self {
            bashforth: &BASHFORTH_8,
            moulton: &MOULTON_8,
            divisor: DIVISOR_8,
            order: 8,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Bashforth coefficient for lag `index` (0 = newest).
    pub fn bashforth(&self, index: usize) -> Result<f64, SimError> {
        self.bashforth
            .get(index)
            .copied()
            .ok_or(SimError::CoefficientIndex {
                index,
                order: self.order,
            })
    }

    /// Moulton coefficient for lag `index` (0 = newest).
    pub fn moulton(&self, index: usize) -> Result<f64, SimError> {
        self.moulton
            .get(index)
            .copied()
            .ok_or(SimError::CoefficientIndex {
                index,
                order: self.order,
            })
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }
}
