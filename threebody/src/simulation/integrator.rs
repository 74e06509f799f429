//! Checkpoint integrators for the three-body system
//!
//! Both integrators advance a [`SystemState`] to a requested checkpoint
//! time and land on it exactly. They are driven by an [`AccelSet`]:
//! - [`DormandPrince`]: adaptive Dormand–Prince 8(5,3) from the `ivp`
//!   crate, restarted at every checkpoint
//! - [`VelocityVerlet`]: fixed step, the span to each checkpoint is split
//!   into equal sub-steps no longer than `h0`

use ivp::prelude::*;
use tracing::trace;

use super::error::{IntegrationError, IntegrationResult};
use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{position_indices, velocity_indices, StateVector, SystemState, N_BODIES, STATE_DIM};
use crate::configuration::config::IntegratorConfig;

/// Counters accumulated over the lifetime of an integrator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegratorStats {
    pub accepted: usize,    // accepted internal steps
    pub rejected: usize,    // rejected internal steps
    pub evaluations: usize, // derivative evaluations
}

pub trait Integrator {
    /// Advance `state` to `t_target` and return the state there
    fn advance_to(
        &mut self,
        state: SystemState,
        forces: &AccelSet,
        t_target: f64,
    ) -> IntegrationResult<SystemState>;

    fn stats(&self) -> IntegratorStats;
}

/// Build the integrator selected in `params`
pub fn make_integrator(params: &Parameters) -> Box<dyn Integrator> {
    match params.integrator {
        IntegratorConfig::Dop853 => Box::new(DormandPrince::new(params.atol, params.rtol, params.max_steps)),
        IntegratorConfig::Verlet => Box::new(VelocityVerlet::new(params.h0, params.max_steps)),
    }
}

fn check_target(state: &SystemState, t_target: f64) -> IntegrationResult<()> {
    if t_target < state.t {
        return Err(IntegrationError::InvalidTarget { t: state.t, target: t_target });
    }
    Ok(())
}

// =========================================================================================
// Dormand–Prince 8(5,3)
// =========================================================================================

/// Phase-space right-hand side handed to the ODE solver
struct GravityOde<'a> {
    forces: &'a AccelSet,
}

impl ODE for GravityOde<'_> {
    fn ode(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        let state = StateVector::from_column_slice(y);
        let d = self.forces.derivative(t, &state);
        dydt.copy_from_slice(d.as_slice());
    }
}

/// Adaptive Dormand–Prince integrator backed by `ivp`'s DOP853
///
/// Every checkpoint is a fresh initial value problem started from the
/// (possibly corrected) state, so no step size is carried between calls.
#[derive(Debug, Clone)]
pub struct DormandPrince {
    pub atol: f64,
    pub rtol: f64,
    pub max_steps: usize, // internal steps allowed per checkpoint
    stats: IntegratorStats,
}

impl DormandPrince {
    pub fn new(atol: f64, rtol: f64, max_steps: usize) -> Self {
        Self {
            atol,
            rtol,
            max_steps,
            stats: IntegratorStats::default(),
        }
    }
}

impl Integrator for DormandPrince {
    fn advance_to(
        &mut self,
        state: SystemState,
        forces: &AccelSet,
        t_target: f64,
    ) -> IntegrationResult<SystemState> {
        check_target(&state, t_target)?;
        if state.t == t_target {
            return Ok(state);
        }

        // coincident bodies give a NaN derivative the solver cannot step through
        let k1 = forces.derivative(state.t, &state.y);
        self.stats.evaluations += 1;
        if !k1.iter().all(|c| c.is_finite()) {
            return Err(IntegrationError::NonFiniteState { t: state.t });
        }

        let ode = GravityOde { forces };
        let y0: [f64; STATE_DIM] = std::array::from_fn(|i| state.y[i]);
        let options = Options::builder()
            .method(Method::DOP853)
            .rtol(self.rtol)
            .atol(self.atol)
            .t_eval(vec![t_target])
            .build();

        let solver_failed = |reason: String| IntegrationError::Solver { t: state.t, target: t_target, reason };
        let sol = solve_ivp(&ode, state.t, t_target, &y0, options)
            .map_err(|err| solver_failed(format!("{:?}", err)))?;

        self.stats.accepted += sol.naccpt as usize;
        self.stats.rejected += sol.nrejct as usize;
        self.stats.evaluations += sol.nfev as usize;

        let steps = sol.nstep as usize;
        if steps > self.max_steps {
            return Err(IntegrationError::TooManySteps { t: state.t, target: t_target, max_steps: self.max_steps });
        }

        let (_, y) = sol
            .iter()
            .last()
            .ok_or_else(|| solver_failed(format!("no solution at checkpoint, status {:?}", sol.status)))?;
        let next = SystemState {
            y: StateVector::from_iterator(y.iter().copied()),
            t: t_target,
        };
        if !next.is_finite() {
            return Err(IntegrationError::NonFiniteState { t: t_target });
        }

        trace!(t = t_target, steps, "dop853 reached checkpoint");
        Ok(next)
    }

    fn stats(&self) -> IntegratorStats {
        self.stats
    }
}

// =========================================================================================
// Velocity Verlet
// =========================================================================================

/// Fixed-step velocity Verlet (kick–drift–kick)
#[derive(Debug, Clone)]
pub struct VelocityVerlet {
    pub h0: f64,           // largest sub-step
    pub max_steps: usize,  // sub-steps allowed per checkpoint
    stats: IntegratorStats,
}

impl VelocityVerlet {
    pub fn new(h0: f64, max_steps: usize) -> Self {
        Self {
            h0,
            max_steps,
            stats: IntegratorStats::default(),
        }
    }

    /// v += dt * a, with `a` read from the velocity slots of `dydt`
    fn kick(y: &mut StateVector, dydt: &StateVector, dt: f64) {
        for i in 0..N_BODIES {
            let (ivx, ivy) = velocity_indices(i);
            y[ivx] += dt * dydt[ivx];
            y[ivy] += dt * dydt[ivy];
        }
    }

    /// x += dt * v
    fn drift(y: &mut StateVector, dt: f64) {
        for i in 0..N_BODIES {
            let (ix, iy) = position_indices(i);
            let (ivx, ivy) = velocity_indices(i);
            y[ix] += dt * y[ivx];
            y[iy] += dt * y[ivy];
        }
    }
}

impl Integrator for VelocityVerlet {
    fn advance_to(
        &mut self,
        state: SystemState,
        forces: &AccelSet,
        t_target: f64,
    ) -> IntegrationResult<SystemState> {
        check_target(&state, t_target)?;

        let span = t_target - state.t;
        if span == 0.0 {
            return Ok(state);
        }
        if self.h0 <= 0.0 || !self.h0.is_finite() {
            return Err(IntegrationError::StepSizeUnderflow { t: state.t, h: self.h0 });
        }

        let n = (span / self.h0).ceil().max(1.0) as usize;
        if n > self.max_steps {
            return Err(IntegrationError::TooManySteps { t: state.t, target: t_target, max_steps: self.max_steps });
        }
        let dt = span / n as f64;
        let half_dt = 0.5 * dt;

        let SystemState { mut y, t: t0 } = state;
        let mut a = forces.derivative(t0, &y);
        self.stats.evaluations += 1;

        for k in 0..n {
            let t = t0 + (k + 1) as f64 * dt;

            // v_n+1/2 = v_n + dt/2 * a_n
            Self::kick(&mut y, &a, half_dt);
            // x_n+1 = x_n + dt * v_n+1/2
            Self::drift(&mut y, dt);
            // v_n+1 = v_n+1/2 + dt/2 * a_n+1
            a = forces.derivative(t, &y);
            Self::kick(&mut y, &a, half_dt);

            self.stats.evaluations += 1;
            self.stats.accepted += 1;

            if !(SystemState { y, t }).is_finite() {
                return Err(IntegrationError::NonFiniteState { t });
            }
        }

        Ok(SystemState { y, t: t_target })
    }

    fn stats(&self) -> IntegratorStats {
        self.stats
    }
}
