//! Quiz Arcade - question-driven arcade mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, entities, collisions, countdown, session state machine)
//! - `games`: The three bespoke games built on `sim` (date shooter, math bubbles, survival)
//! - `content`: Question banks supplied by the surrounding application
//! - `scheduler`: Per-display-refresh frame driver
//! - `renderer`: Scene snapshot and WebGPU painting
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Persisted player preferences

pub mod content;
pub mod error;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::{ContentError, RenderError};
pub use games::{AnySession, GameKind};
pub use scheduler::{FrameOutcome, FrameScheduler};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Countdown cadence, independent of the display refresh
    pub const COUNTDOWN_PERIOD_MS: i32 = 1000;
    /// Minimum time between two shots
    pub const FIRE_COOLDOWN_MS: f64 = 200.0;
    /// Score awarded for every correct hit or answer
    pub const CORRECT_REWARD: u64 = 100;
    /// Shortest countdown any difficulty can produce (seconds)
    pub const MIN_TIME_LIMIT: u32 = 5;
}

/// Uniform sample in `[min, max)`, tolerating an empty range
#[inline]
pub fn rand_range<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Random sign: -1.0 or 1.0 with equal probability
#[inline]
pub fn rand_sign<R: rand::Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
