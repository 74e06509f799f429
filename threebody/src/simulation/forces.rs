//! Force / acceleration contributors for the three-body engine
//!
//! Defines the acceleration trait, direct Newtonian gravity, and the
//! derivative function that turns accelerations into the time-derivative
//! of the full phase vector

use crate::simulation::states::{
    position_indices, velocity_indices, Body, NVec2, StateVector, N_BODIES,
};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for the given positions
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, x: &[NVec2; N_BODIES], out: &mut [NVec2; N_BODIES]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, x, out);
        }
    }

    /// Time-derivative of the phase vector: positions advance with the
    /// velocities, velocities with the summed accelerations
    pub fn derivative(&self, t: f64, y: &StateVector) -> StateVector {
        let x: [NVec2; N_BODIES] = std::array::from_fn(|i| {
            let (ix, iy) = position_indices(i);
            NVec2::new(y[ix], y[iy])
        });
        let mut acc = [NVec2::zeros(); N_BODIES];
        self.accumulate_accels(t, &x, &mut acc);

        let mut dydt = StateVector::zeros();
        for (i, a) in acc.iter().enumerate() {
            let (ix, iy) = position_indices(i);
            let (ivx, ivy) = velocity_indices(i);
            dydt[ix] = y[ivx];
            dydt[iy] = y[ivy];
            dydt[ivx] = a.x;
            dydt[ivy] = a.y;
        }
        dydt
    }

    /// Sum of the potential energy of every term at the given positions
    pub fn potential_energy(&self, x: &[NVec2; N_BODIES]) -> f64 {
        self.terms.iter().map(|term| term.potential_energy(x)).sum()
    }
}

/// Trait for acceleration sources acting on the body positions
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, x: &[NVec2; N_BODIES], out: &mut [NVec2; N_BODIES]);

    /// Potential energy of the configuration, zero for non-conservative terms
    fn potential_energy(&self, _x: &[NVec2; N_BODIES]) -> f64 {
        0.0
    }
}

/// Newtonian point-mass gravity, direct pairwise sum
/// No softening: coincident bodies divide by zero and yield inf / NaN
pub struct NewtonianGravity {
    pub g: f64,                // gravitational constant
    pub masses: [f64; N_BODIES], // mass of each body, fixed for the run
}

impl NewtonianGravity {
    pub fn new(g: f64, bodies: &[Body; N_BODIES]) -> Self {
        Self {
            g,
            masses: bodies.map(|b| b.m),
        }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, x: &[NVec2; N_BODIES], out: &mut [NVec2; N_BODIES]) {
        // Loop over each unordered pair (i, j) with i < j
        for i in 0..N_BODIES {
            for j in (i + 1)..N_BODIES {
                // r points from i to j, so i is pulled along +r and j along -r
                let r = x[j] - x[i];
                let d = r.norm();

                // coef = G / |r|^3
                let coef = self.g / (d * d * d);

                out[i] += coef * self.masses[j] * r;
                out[j] -= coef * self.masses[i] * r;
            }
        }
    }

    fn potential_energy(&self, x: &[NVec2; N_BODIES]) -> f64 {
        let mut u = 0.0;
        for i in 0..N_BODIES {
            for j in (i + 1)..N_BODIES {
                u -= self.g * self.masses[i] * self.masses[j] / (x[j] - x[i]).norm();
            }
        }
        u
    }
}
