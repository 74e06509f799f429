//! Frame loop driving integration, recording and collision correction
//!
//! For every frame boundary `k -> k+1` of the time grid the engine
//! advances the state to `t[k+1]`, records the positions, then applies the
//! collision corrector. The corrected state seeds the next frame.

use tracing::{debug, info};

use crate::simulation::error::SimulationError;
use crate::simulation::integrator::make_integrator;
use crate::simulation::scenario::Scenario;
use crate::simulation::trajectory::{SimulationRun, Trajectories};

pub fn run(scenario: &Scenario) -> Result<SimulationRun, SimulationError> {
    let params = &scenario.parameters;
    let times = params.time_grid();
    let mut integrator = make_integrator(params);

    let mut trajectories = Trajectories::seeded(&scenario.initial, times.len());
    let mut collisions = Vec::new();
    let mut state = scenario.initial;
    let e0 = scenario.total_energy(&state);

    info!(
        frames = params.frames,
        t_end = params.t_end(),
        integrator = ?params.integrator,
        "starting three-body run"
    );

    for (k, &t_next) in times.iter().enumerate().skip(1) {
        let advanced = integrator
            .advance_to(state, &scenario.forces, t_next)
            .map_err(|source| SimulationError::Integration { frame: k, source })?;

        trajectories.record(&advanced);

        state = match &params.collision {
            Some(corrector) => {
                let (corrected, event) = corrector.apply(advanced, &scenario.bodies, k);
                if let Some(event) = event {
                    debug!(
                        frame = event.frame,
                        t = event.t,
                        bodies = ?event.bodies,
                        before = ?event.vx_before,
                        after = ?event.vx_after,
                        "collision corrected x-velocities"
                    );
                    collisions.push(event);
                }
                corrected
            }
            None => advanced,
        };
    }

    let stats = integrator.stats();
    let e1 = scenario.total_energy(&state);
    info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        evaluations = stats.evaluations,
        collisions = collisions.len(),
        energy_drift = (e1 - e0) / e0.abs(),
        "run complete"
    );

    Ok(SimulationRun {
        times,
        trajectories,
        collisions,
        stats,
        final_state: state,
    })
}
