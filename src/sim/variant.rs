//! The seam between the shared session machinery and each bespoke game
//!
//! A variant owns its entities and content and knows how to spawn a level,
//! integrate motion and report the first collision. Scoring, lives, the
//! countdown and the transition lock stay in [`super::Session`].

use glam::Vec2;
use rand_pcg::Pcg32;

use super::entity::Bounds;

/// What a wrong hit or wrong answer costs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrongOutcome {
    /// Lose a life; retry the level, or game over at zero lives
    LoseLife,
    /// Retry the current level
    RetryLevel,
    /// End the session immediately
    EndGame,
}

/// What the countdown reaching zero does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutOutcome {
    /// Treated exactly like a wrong hit
    AsWrong,
    /// Freeze play and prompt the level's question
    AskQuestion,
}

/// Something that may trigger a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A projectile struck an answer target
    Hit { correct: bool },
    /// A hazard touched the player
    HazardContact,
    /// The countdown expired
    Timeout,
    /// An option was chosen at the question prompt
    Answer { index: usize },
}

/// Inputs sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInput {
    pub direction: Vec2,
    pub fire: bool,
}

/// Everything a variant needs to (re)build a level
pub struct SpawnContext<'a> {
    /// 1-based level number
    pub level: u32,
    /// True when restarting the same level; the question is kept
    pub retry: bool,
    /// Difficulty multiplier for entity speeds
    pub speed_scale: f32,
    pub rng: &'a mut Pcg32,
}

/// Question text (and options, if any) for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prompt<'a> {
    pub text: &'a str,
    pub options: &'a [String],
}

pub trait Variant {
    /// Lives at session start; `None` for games without a lives pool
    const STARTING_LIVES: Option<u8>;
    /// Pause between a correct hit and the next level
    const ADVANCE_DELAY_MS: f64;
    /// Pause between a wrong hit (or timeout) and the retry
    const RETRY_DELAY_MS: f64;
    const ON_WRONG: WrongOutcome;
    const ON_TIMEOUT: TimeoutOutcome;

    fn playfield(&self) -> Bounds;

    /// Total levels, or `None` when play continues until failure
    fn level_count(&self) -> Option<u32>;

    /// Countdown length for `level`, in seconds, before difficulty scaling
    fn time_limit(&self, level: u32) -> u32;

    /// Back to the pre-game state: no entities, player at the start
    fn reset(&mut self);

    /// Generate the entities for a level
    fn spawn_level(&mut self, ctx: &mut SpawnContext<'_>);

    /// Spawn a projectile; returns false for games without shooting
    fn fire(&mut self) -> bool {
        false
    }

    /// Move the player, projectiles and targets by `dt`
    fn integrate(&mut self, input: &StepInput, dt: f32, rng: &mut Pcg32);

    /// Report the first collision this tick, consuming the entities involved
    fn collide(&mut self) -> Option<Trigger>;

    /// Question for the current level
    fn prompt(&self, level: u32) -> Option<Prompt<'_>>;

    /// Whether `index` answers the level's question; `None` if this game
    /// takes no direct answers
    fn check_answer(&self, _level: u32, _index: usize) -> Option<bool> {
        None
    }
}
