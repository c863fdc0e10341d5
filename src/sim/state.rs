//! Session state and core simulation types
//!
//! A [`Session`] is the single owned value every entry point (frame
//! callback, key handlers, countdown callback) mutates. Phase, level, score
//! and lives are only changed by the transitions in `session.rs`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputController;
use super::timer::Countdown;
use crate::consts::{FIRE_COOLDOWN_MS, MIN_TIME_LIMIT};
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Mounted, waiting for the start action
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen by the player; countdown suspended
    Paused,
    /// Between a hit (or timeout) and the next spawn
    Transitioning,
    /// Waiting for an answer at the question prompt
    Question,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Transitioning => "transitioning",
            Phase::Question => "question",
            Phase::GameOver => "game-over",
        }
    }
}

/// Notable things that happened, drained by the platform once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32, retry: bool },
    Fired,
    Correct { level: u32, score: u64 },
    Wrong { lives: Option<u8> },
    TimeUp { lives: Option<u8> },
    QuestionPrompt { level: u32 },
    Paused,
    Resumed,
    GameOver { won: bool, level: u32, score: u64 },
}

impl GameEvent {
    /// Short message shown over the playfield, if any
    pub fn banner(&self) -> Option<String> {
        match self {
            GameEvent::Correct { .. } => Some("Correct! Next level".into()),
            GameEvent::Wrong { lives: Some(n) } => Some(format!("Wrong! Lives left: {}", n)),
            GameEvent::Wrong { lives: None } => Some("Wrong! Restarting level".into()),
            GameEvent::TimeUp { lives: Some(n) } => Some(format!("Time up! Lives left: {}", n)),
            GameEvent::TimeUp { lives: None } => Some("Time up! Restarting level".into()),
            GameEvent::QuestionPrompt { .. } => Some("Time up! Answer to continue".into()),
            GameEvent::GameOver { won: true, .. } => Some("You completed all levels!".into()),
            GameEvent::GameOver { won: false, level, .. } => {
                Some(format!("Game over! You reached level {}", level))
            }
            GameEvent::LevelStarted { .. }
            | GameEvent::Fired
            | GameEvent::Paused
            | GameEvent::Resumed => None,
        }
    }
}

/// Guard admitting at most one transition per triggering window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLock {
    held: bool,
}

impl TransitionLock {
    /// Take the lock; false if it was already held
    pub fn engage(&mut self) -> bool {
        !std::mem::replace(&mut self.held, true)
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Which spawn a delayed transition ends in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    Advance,
    Retry,
}

/// A transition waiting out its delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub kind: PendingKind,
    /// Frame-clock time (ms) at which the spawn happens
    pub due_ms: f64,
}

/// Difficulty-derived knobs read once at session construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub time_scale: f32,
    pub speed_scale: f32,
    pub fire_cooldown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            speed_scale: 1.0,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
        }
    }
}

impl From<&Settings> for Tuning {
    fn from(settings: &Settings) -> Self {
        Self {
            time_scale: settings.difficulty.time_scale(),
            speed_scale: settings.difficulty.speed_scale(),
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
        }
    }
}

impl Tuning {
    /// Countdown length after difficulty scaling
    pub fn scaled_limit(&self, seconds: u32) -> u32 {
        ((seconds as f32 * self.time_scale).round() as u32).max(MIN_TIME_LIMIT)
    }
}

/// One game session: shared bookkeeping around a variant's entities
#[derive(Debug, Clone)]
pub struct Session<G> {
    /// Variant-specific entities and content
    pub game: G,
    pub(crate) phase: Phase,
    /// 1-based level
    pub(crate) level: u32,
    pub(crate) score: u64,
    pub(crate) lives: Option<u8>,
    pub(crate) won: bool,
    pub(crate) countdown: Countdown,
    pub(crate) input: InputController,
    pub(crate) pending: Option<PendingTransition>,
    pub(crate) lock: TransitionLock,
    pub(crate) rng: Pcg32,
    pub(crate) seed: u64,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) tuning: Tuning,
    /// Simulation ticks that ran integration
    pub(crate) time_ticks: u64,
    pub(crate) torn_down: bool,
}

impl<G> Session<G> {
    /// Shared constructor; the state machine entry points live in `session.rs`
    pub(crate) fn with_parts(game: G, tuning: Tuning, lives: Option<u8>, seed: u64) -> Self {
        Self {
            game,
            phase: Phase::Menu,
            level: 1,
            score: 0,
            lives,
            won: false,
            countdown: Countdown::new(),
            input: InputController::new(tuning.fire_cooldown_ms),
            pending: None,
            lock: TransitionLock::default(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            events: Vec::new(),
            tuning,
            time_ticks: 0,
            torn_down: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> Option<u8> {
        self.lives
    }

    /// True once the session ended by clearing every level
    pub fn won(&self) -> bool {
        self.won
    }

    /// Seconds left on the current level
    pub fn time_left(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_held()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
