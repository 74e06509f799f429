pub mod states;
pub mod params;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod collision;
pub mod trajectory;
pub mod scenario;
pub mod engine;
