pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, SystemState, NVec2, StateVector, N_BODIES, STATE_DIM};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{DormandPrince, Integrator, IntegratorStats, VelocityVerlet};
pub use simulation::collision::{resolve_x_collision, CollisionCorrector, CollisionEvent, CollisionPredicate, Contact};
pub use simulation::error::{ConfigError, IntegrationError, SimulationError};
pub use simulation::scenario::Scenario;
pub use simulation::trajectory::{SimulationRun, Trajectories};
pub use simulation::engine::run;

pub use configuration::config::{IntegratorConfig, ParametersConfig, CollisionConfig, BodyConfig, RenderConfig, ScenarioConfig};

pub use visualization::animation::{render_animation, write_gif, FrameRenderer, FrameView, GifRenderer, RenderError};
#[cfg(feature = "viewer")]
pub use visualization::viewer::run_viewer;

pub use benchmark::benchmark::{bench_integrators, BenchResult};
