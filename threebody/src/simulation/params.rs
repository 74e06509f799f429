//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - span of the run (`years`) and number of recorded `frames`,
//! - error tolerances and step limits for the integrator,
//! - gravitational constant `G`,
//! - collision rule applied after every frame

use crate::configuration::config::IntegratorConfig;
use crate::simulation::collision::CollisionCorrector;

pub const SECONDS_IN_DAY: f64 = 24.0 * 60.0 * 60.0;
pub const SECONDS_IN_YEAR: f64 = 365.0 * SECONDS_IN_DAY;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub years: f64,                          // simulated span in years
    pub frames: usize,                       // recorded frames, including t = 0
    pub g: f64,                              // gravitational constant
    pub integrator: IntegratorConfig,        // dop853 or verlet
    pub h0: f64,                             // fixed verlet step size
    pub atol: f64,                           // absolute error tolerance
    pub rtol: f64,                           // relative error tolerance
    pub max_steps: usize,                    // internal steps allowed per frame
    pub collision: Option<CollisionCorrector>, // None disables collision checks
}

impl Parameters {
    pub fn t_end(&self) -> f64 {
        self.years * SECONDS_IN_YEAR
    }

    /// Evenly spaced checkpoints over `[0, t_end]`, `frames` entries
    pub fn time_grid(&self) -> Vec<f64> {
        linspace(0.0, self.t_end(), self.frames)
    }
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|k| start + k as f64 * step).collect();
            // pin the endpoint against accumulated rounding
            grid[n - 1] = end;
            grid
        }
    }
}
