//! Error types for scenario building and integration using `thiserror`.

use thiserror::Error;

/// Scenario validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Scenario does not describe exactly three bodies
    #[error("expected exactly 3 bodies, got {got}")]
    BodyCount {
        /// Number of bodies found in the scenario
        got: usize,
    },

    /// Not enough frames to take a single step
    #[error("need at least 2 frames, got {frames}")]
    TooFewFrames {
        /// Configured frame count
        frames: usize,
    },

    /// Body with an unusable mass or radius
    #[error("body {id}: {reason}")]
    InvalidBody {
        /// 1-based body id
        id: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Numerical parameter out of range
    #[error("invalid parameter {parameter}: {value}")]
    InvalidParameter {
        /// Parameter name
        parameter: &'static str,
        /// Offending value
        value: f64,
    },

    /// Collision pair refers to a missing body or to one body twice
    #[error("invalid collision pair {pair:?}: ids must be distinct and in 1..=3")]
    CollisionPair {
        /// Configured pair of 1-based ids
        pair: [usize; 2],
    },
}

/// Integrator failures; any of these aborts the run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// Step size cannot advance the time axis
    #[error("unusable step size at t = {t} s (h = {h:e} s)")]
    StepSizeUnderflow {
        /// Time reached
        t: f64,
        /// Rejected step size
        h: f64,
    },

    /// Too many internal steps between two checkpoints
    #[error("more than {max_steps} internal steps before t = {target} s (stuck at t = {t} s)")]
    TooManySteps {
        /// Time reached
        t: f64,
        /// Checkpoint being integrated to
        target: f64,
        /// Configured limit
        max_steps: usize,
    },

    /// Phase vector picked up an infinity or NaN
    #[error("state became non-finite at t = {t} s")]
    NonFiniteState {
        /// Time of the offending step
        t: f64,
    },

    /// The ODE solver gave up before reaching the checkpoint
    #[error("ODE solver failed between t = {t} s and t = {target} s: {reason}")]
    Solver {
        /// Time the solve started from
        t: f64,
        /// Checkpoint being integrated to
        target: f64,
        /// Solver-reported cause
        reason: String,
    },

    /// Checkpoint earlier than the current time
    #[error("target t = {target} s lies before current t = {t} s")]
    InvalidTarget {
        /// Current time
        t: f64,
        /// Requested checkpoint
        target: f64,
    },
}

/// Run-level failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Integration failed while advancing to `frame`
    #[error("integration failed at frame {frame}: {source}")]
    Integration {
        /// Frame being integrated to
        frame: usize,
        /// Underlying integrator error
        #[source]
        source: IntegrationError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type IntegrationResult<T> = Result<T, IntegrationError>;
