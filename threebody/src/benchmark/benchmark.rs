use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::engine;
use crate::simulation::error::SimulationError;
use crate::simulation::scenario::Scenario;

/// One timed run of a scenario with a given integrator
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub integrator: IntegratorConfig,
    pub seconds: f64,      // wall time of the run
    pub accepted: usize,   // accepted internal steps
    pub rejected: usize,   // rejected internal steps
    pub evaluations: usize, // derivative evaluations
    pub energy_drift: f64, // relative change of total energy, start to end
}

/// Time the scenario once with Dormand–Prince and once with Verlet.
///
/// Verlet uses the scenario's `h0` when set, otherwise one sub-step per
/// hour of simulated time.
pub fn bench_integrators(scenario: &mut Scenario) -> Result<Vec<BenchResult>, SimulationError> {
    let original = scenario.parameters.clone();
    let mut results = Vec::with_capacity(2);

    for integrator in [IntegratorConfig::Dop853, IntegratorConfig::Verlet] {
        scenario.parameters.integrator = integrator;
        if integrator == IntegratorConfig::Verlet && scenario.parameters.h0 <= 0.0 {
            scenario.parameters.h0 = 3600.0;
            let frame = scenario.parameters.t_end() / (scenario.parameters.frames - 1) as f64;
            scenario.parameters.max_steps = scenario.parameters.max_steps.max((frame / 3600.0).ceil() as usize);
        }

        let e0 = scenario.total_energy(&scenario.initial);
        let t0 = Instant::now();
        let run = engine::run(scenario);
        let seconds = t0.elapsed().as_secs_f64();
        scenario.parameters = original.clone();

        let run = run?;
        let e1 = scenario.total_energy(&run.final_state);

        let result = BenchResult {
            integrator,
            seconds,
            accepted: run.stats.accepted,
            rejected: run.stats.rejected,
            evaluations: run.stats.evaluations,
            energy_drift: (e1 - e0) / e0.abs(),
        };
        println!(
            "{:?}: {:8.6} s, steps = {} (+{} rejected), evals = {}, energy drift = {:.3e}",
            result.integrator, result.seconds, result.accepted, result.rejected, result.evaluations, result.energy_drift
        );
        results.push(result);
    }

    Ok(results)
}
