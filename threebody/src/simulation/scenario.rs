//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it and produces the
//! runtime bundle consumed by the engine:
//! - numerical parameters (`Parameters`)
//! - body properties (`Body`) and the state at t = 0 (`SystemState`)
//! - active force set (`AccelSet`)
//! - render settings, checked for a usable view

use crate::configuration::config::{BodyConfig, CollisionConfig, IntegratorConfig, ScenarioConfig, RenderConfig};
use crate::simulation::collision::CollisionCorrector;
use crate::simulation::error::{ConfigError, ConfigResult};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, SystemState, N_BODIES};

/// Immutable runtime bundle for one simulation
///
/// Several scenarios can coexist; nothing here is global.
pub struct Scenario {
    pub parameters: Parameters,
    pub bodies: [Body; N_BODIES],
    pub initial: SystemState,
    pub forces: AccelSet,
    pub render: RenderConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> ConfigResult<Self> {
        if cfg.bodies.len() != N_BODIES {
            return Err(ConfigError::BodyCount { got: cfg.bodies.len() });
        }
        for (i, bc) in cfg.bodies.iter().enumerate() {
            validate_body(i + 1, bc)?;
        }

        // Bodies: map `BodyConfig` -> runtime `Body`, ids are 1-based
        let bodies: [Body; N_BODIES] = std::array::from_fn(|i| Body {
            id: i + 1,
            m: cfg.bodies[i].m,
            radius: cfg.bodies[i].radius,
        });

        // Initial system state: bodies at t = 0
        let initial = SystemState::from_bodies(
            0.0,
            std::array::from_fn(|i| NVec2::new(cfg.bodies[i].x[0], cfg.bodies[i].x[1])),
            std::array::from_fn(|i| NVec2::new(cfg.bodies[i].v[0], cfg.bodies[i].v[1])),
        );

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        if p_cfg.frames < 2 {
            return Err(ConfigError::TooFewFrames { frames: p_cfg.frames });
        }
        positive("years", p_cfg.years)?;
        if !(p_cfg.g.is_finite() && p_cfg.g >= 0.0) {
            return Err(ConfigError::InvalidParameter { parameter: "G", value: p_cfg.g });
        }
        if !(p_cfg.h0.is_finite() && p_cfg.h0 >= 0.0) {
            return Err(ConfigError::InvalidParameter { parameter: "h0", value: p_cfg.h0 });
        }
        match p_cfg.integrator {
            IntegratorConfig::Dop853 => {
                positive("atol", p_cfg.atol)?;
                positive("rtol", p_cfg.rtol)?;
            }
            IntegratorConfig::Verlet => positive("h0", p_cfg.h0)?,
        }
        if p_cfg.max_steps == 0 {
            return Err(ConfigError::InvalidParameter { parameter: "max_steps", value: 0.0 });
        }

        let collision = cfg.collision.as_ref().map(corrector).transpose()?;

        // Render: the view must map onto a non-empty square
        positive("extent", cfg.render.extent)?;
        if cfg.render.size == 0 {
            return Err(ConfigError::InvalidParameter { parameter: "size", value: 0.0 });
        }

        let parameters = Parameters {
            years: p_cfg.years,
            frames: p_cfg.frames,
            g: p_cfg.g,
            integrator: p_cfg.integrator,
            h0: p_cfg.h0,
            atol: p_cfg.atol,
            rtol: p_cfg.rtol,
            max_steps: p_cfg.max_steps,
            collision,
        };

        // Forces: Newtonian gravity is the only term
        let forces = AccelSet::new().with(NewtonianGravity::new(parameters.g, &bodies));

        Ok(Self {
            parameters,
            bodies,
            initial,
            forces,
            render: cfg.render,
        })
    }

    pub fn masses(&self) -> [f64; N_BODIES] {
        self.bodies.map(|b| b.m)
    }

    /// Kinetic plus potential energy of `state`
    pub fn total_energy(&self, state: &SystemState) -> f64 {
        state.kinetic_energy(&self.bodies) + self.forces.potential_energy(&state.positions())
    }
}

fn positive(parameter: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { parameter, value })
    }
}

fn validate_body(id: usize, bc: &BodyConfig) -> ConfigResult<()> {
    let invalid = |reason: &str| ConfigError::InvalidBody { id, reason: reason.to_string() };

    if !(bc.m.is_finite() && bc.m >= 0.0) {
        return Err(invalid("mass must be finite and non-negative"));
    }
    if !(bc.radius.is_finite() && bc.radius > 0.0) {
        return Err(invalid("radius must be finite and positive"));
    }
    if !bc.x.iter().chain(bc.v.iter()).all(|c| c.is_finite()) {
        return Err(invalid("position and velocity must be finite"));
    }
    Ok(())
}

fn corrector(cc: &CollisionConfig) -> ConfigResult<CollisionCorrector> {
    let [a, b] = cc.pair;
    let in_range = |id: usize| (1..=N_BODIES).contains(&id);
    if a == b || !in_range(a) || !in_range(b) {
        return Err(ConfigError::CollisionPair { pair: cc.pair });
    }
    Ok(CollisionCorrector::new(a - 1, b - 1, cc.predicate))
}
