//! Recorded output of a run
//!
//! `Trajectories` keeps one position per body per frame, seeded with the
//! initial positions. `SimulationRun` bundles them with the time grid, the
//! collision log and integrator counters. Nothing here changes after the
//! run returns.

use crate::simulation::collision::CollisionEvent;
use crate::simulation::integrator::IntegratorStats;
use crate::simulation::states::{NVec2, SystemState, N_BODIES};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectories {
    paths: [Vec<NVec2>; N_BODIES],
}

impl Trajectories {
    /// Start every path at the positions held by `initial`
    pub fn seeded(initial: &SystemState, capacity: usize) -> Self {
        let mut paths: [Vec<NVec2>; N_BODIES] = std::array::from_fn(|_| Vec::with_capacity(capacity));
        for (i, path) in paths.iter_mut().enumerate() {
            path.push(initial.position(i));
        }
        Self { paths }
    }

    /// Append the positions held by `state`
    pub fn record(&mut self, state: &SystemState) {
        for (i, path) in self.paths.iter_mut().enumerate() {
            path.push(state.position(i));
        }
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.paths[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions of body `i` (0-based), one per frame
    pub fn path(&self, i: usize) -> &[NVec2] {
        &self.paths[i]
    }

    /// Positions of all bodies at frame `k`
    pub fn frame(&self, k: usize) -> Option<[NVec2; N_BODIES]> {
        if k >= self.len() {
            return None;
        }
        Some(std::array::from_fn(|i| self.paths[i][k]))
    }
}

#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub times: Vec<f64>,                 // time grid, one entry per frame
    pub trajectories: Trajectories,      // recorded positions
    pub collisions: Vec<CollisionEvent>, // velocity corrections, in order
    pub stats: IntegratorStats,          // integrator counters for the whole run
    pub final_state: SystemState,        // state after the last correction
}

impl SimulationRun {
    pub fn frames(&self) -> usize {
        self.trajectories.len()
    }
}
