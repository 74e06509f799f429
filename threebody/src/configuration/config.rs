//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – span, frame count, integrator and physical constants
//! - [`CollisionConfig`]  – which pair of bodies is checked for contact, and how
//! - [`BodyConfig`]       – initial state for each of the three bodies
//! - [`RenderConfig`]     – animation output settings
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section is optional; anything left out falls back to
//! [`ScenarioConfig::default`], the star / planet / moon setup that
//! `scenarios/default.yaml` spells out.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   years: 0.5
//!   frames: 365
//!   G: 6.67e-11
//!   integrator: "dop853"    # or "verlet"
//!   h0: 0.0                 # verlet step size, unused by dop853
//!   atol: 1.49012e-8
//!   rtol: 1.49012e-8
//!   max_steps: 500
//!
//! collision:
//!   pair: [2, 3]            # 1-based body ids
//!   predicate: "symmetric"  # "signed", "symmetric" or "radial"
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.998e30
//!     radius: 7.0e6
//!   # ... exactly three bodies
//!
//! render:
//!   output: "collision.gif"
//!   size: 480
//!   extent: 2.98e11
//!   frame_delay_ms: 30
//! ```

use serde::{Deserialize, Serialize};

use crate::simulation::collision::CollisionPredicate;

/// Which integrator method used by the engine
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "dop853")] // Adaptive Dormand–Prince 8(5,3) via the ivp crate
    Dop853,

    #[serde(rename = "verlet")] // Velocity Verlet, fixed step size h0, symplectic
    Verlet,
}

/// Global numerical and physical parameters for a scenario
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub years: f64,  // simulated span in years
    pub frames: usize, // recorded frames, including the initial one
    #[serde(rename = "G")]
    pub g: f64,      // gravitational constant
    pub integrator: IntegratorConfig,
    pub h0: f64,     // verlet step size in seconds
    pub atol: f64,   // absolute error tolerance
    pub rtol: f64,   // relative error tolerance
    pub max_steps: usize, // internal steps allowed per frame
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            years: 0.5,
            frames: 365,
            g: 6.67e-11,
            integrator: IntegratorConfig::Dop853,
            h0: 0.0,
            atol: 1.49012e-8,
            rtol: 1.49012e-8,
            max_steps: 500,
        }
    }
}

/// Pair of bodies checked for contact after every frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    pub pair: [usize; 2],               // 1-based body ids
    pub predicate: CollisionPredicate,  // contact test
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            pair: [2, 3],
            predicate: CollisionPredicate::default(),
        }
    }
}

/// Configuration for a single body’s initial state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in metres
    pub v: [f64; 2], // initial velocity in metres per second
    pub m: f64,      // mass in kilograms
    pub radius: f64, // collision radius in metres
}

/// Animation output settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub output: String,      // path of the animated GIF
    pub size: u16,           // frame width and height in pixels
    pub extent: f64,         // half-width of the square view in metres
    pub frame_delay_ms: u32, // delay between frames
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: "collision.gif".to_string(),
            size: 480,
            extent: 2.0 * 149.0e9,
            frame_delay_ms: 30,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,     // global numerical and physical parameters
    pub collision: Option<CollisionConfig>, // `null` disables collision checks
    pub bodies: Vec<BodyConfig>,          // star first, then the two planets
    pub render: RenderConfig,             // animation output
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            collision: Some(CollisionConfig::default()),
            bodies: vec![
                BodyConfig {
                    x: [0.0, 0.0],
                    v: [0.0, 0.0],
                    m: 1.998e30,
                    radius: 7.0e6,
                },
                BodyConfig {
                    x: [149.0e9, 0.0],
                    v: [0.0, 30_000.0],
                    m: 5.64e24,
                    radius: 7.0e6,
                },
                BodyConfig {
                    x: [0.0, 149.0e9],
                    v: [15_000.0, 0.0],
                    m: 3.6e22,
                    radius: 7.0e6,
                },
            ],
            render: RenderConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
