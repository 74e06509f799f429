//! Core state types for the three-body simulation.
//!
//! - `Body` holds the immutable physical properties of one mass
//! - `SystemState` holds the 12-component phase vector at one instant
//!
//! The phase vector is laid out as `(x, vx, y, vy)` per body, bodies in
//! fixed order, so body `i` lives at indices `4*i .. 4*i + 4`.

use nalgebra::{SVector, Vector2};

pub type NVec2 = Vector2<f64>;

/// Number of simulated bodies
pub const N_BODIES: usize = 3;

/// Number of scalar components in the phase vector
pub const STATE_DIM: usize = 4 * N_BODIES;

pub type StateVector = SVector<f64, STATE_DIM>;

const X: usize = 0;
const VX: usize = 1;
const Y: usize = 2;
const VY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: usize,   // 1-based identifier
    pub m: f64,      // mass
    pub radius: f64, // collision radius
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemState {
    pub y: StateVector, // phase vector
    pub t: f64,         // time
}

impl SystemState {
    /// Build a state from per-body positions and velocities
    pub fn from_bodies(t: f64, x: [NVec2; N_BODIES], v: [NVec2; N_BODIES]) -> Self {
        let mut y = StateVector::zeros();
        for i in 0..N_BODIES {
            y[4 * i + X] = x[i].x;
            y[4 * i + VX] = v[i].x;
            y[4 * i + Y] = x[i].y;
            y[4 * i + VY] = v[i].y;
        }
        Self { y, t }
    }

    pub fn position(&self, i: usize) -> NVec2 {
        NVec2::new(self.y[4 * i + X], self.y[4 * i + Y])
    }

    pub fn velocity(&self, i: usize) -> NVec2 {
        NVec2::new(self.y[4 * i + VX], self.y[4 * i + VY])
    }

    pub fn positions(&self) -> [NVec2; N_BODIES] {
        std::array::from_fn(|i| self.position(i))
    }

    /// Copy of this state with body `i`'s x-velocity replaced
    pub fn with_velocity_x(mut self, i: usize, vx: f64) -> Self {
        self.y[4 * i + VX] = vx;
        self
    }

    /// Total linear momentum `sum m_i v_i`
    pub fn total_momentum(&self, bodies: &[Body; N_BODIES]) -> NVec2 {
        bodies
            .iter()
            .enumerate()
            .fold(NVec2::zeros(), |p, (i, b)| p + b.m * self.velocity(i))
    }

    /// Total kinetic energy `sum 1/2 m_i |v_i|^2`
    pub fn kinetic_energy(&self, bodies: &[Body; N_BODIES]) -> f64 {
        bodies
            .iter()
            .enumerate()
            .map(|(i, b)| 0.5 * b.m * self.velocity(i).norm_squared())
            .sum()
    }

    pub fn is_finite(&self) -> bool {
        self.y.iter().all(|c| c.is_finite())
    }
}

/// Indices of body `i`'s velocity components inside the phase vector
pub(crate) fn velocity_indices(i: usize) -> (usize, usize) {
    (4 * i + VX, 4 * i + VY)
}

/// Indices of body `i`'s position components inside the phase vector
pub(crate) fn position_indices(i: usize) -> (usize, usize) {
    (4 * i + X, 4 * i + Y)
}
