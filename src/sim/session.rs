//! Level/session state machine
//!
//! ```text
//! Menu -> Playing <-> Paused
//! Playing -> Transitioning -> Playing     (next level or retry, after a delay)
//! Playing -> Question -> Playing          (answer prompt, synchronous)
//! Playing | Question -> GameOver -> Menu  (reset only)
//! ```
//!
//! Collisions and countdown expiry race each other. Both go through
//! [`Session::resolve`], which takes the transition lock before touching
//! score, lives or phase; whichever arrives second finds the lock held and
//! is dropped. The lock is released only when the next level has spawned
//! or the session reaches `GameOver`.

use super::input::Key;
use super::state::{GameEvent, PendingKind, PendingTransition, Phase, Session, Tuning};
use super::timer::{CountdownId, CountdownTick};
use super::variant::{SpawnContext, TimeoutOutcome, Trigger, Variant, WrongOutcome};
use crate::consts::CORRECT_REWARD;
use crate::settings::Settings;

/// Why a level was failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    WrongHit,
    WrongAnswer,
    Timeout,
}

impl<G: Variant> Session<G> {
    /// Mount a session in `Menu`
    pub fn new(game: G, settings: &Settings, seed: u64) -> Self {
        Self::with_tuning(game, Tuning::from(settings), seed)
    }

    pub fn with_tuning(game: G, tuning: Tuning, seed: u64) -> Self {
        let mut session = Self::with_parts(game, tuning, G::STARTING_LIVES, seed);
        session.game.reset();
        session
    }

    /// Start action: `Menu -> Playing` with level 1 spawned
    pub fn start(&mut self) -> bool {
        if self.torn_down || self.phase != Phase::Menu {
            return false;
        }
        self.level = 1;
        self.score = 0;
        self.lives = G::STARTING_LIVES;
        self.won = false;
        log::info!("Session started (seed {})", self.seed);
        self.begin_level(false);
        true
    }

    /// Explicit reset from any phase back to `Menu`
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.countdown.cancel();
        self.pending = None;
        self.lock.release();
        self.input.clear();
        self.events.clear();
        self.game.reset();
        self.phase = Phase::Menu;
        self.level = 1;
        self.score = 0;
        self.lives = G::STARTING_LIVES;
        self.won = false;
        log::info!("Session reset to menu");
    }

    /// Whether key presses currently reach the input controller
    pub fn accepts_input(&self) -> bool {
        !self.torn_down && self.phase == Phase::Playing && !self.lock.is_held()
    }

    pub fn key_down(&mut self, key: Key, now_ms: f64) {
        if self.torn_down {
            return;
        }
        if key == Key::Pause {
            self.toggle_pause();
            return;
        }
        if self.accepts_input() {
            self.input.press(key, now_ms);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if !self.torn_down {
            self.input.release(key);
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// `Playing -> Paused`; the countdown stops with its remaining time
    pub fn pause(&mut self) -> bool {
        if self.torn_down || self.phase != Phase::Playing || self.lock.is_held() {
            return false;
        }
        self.phase = Phase::Paused;
        self.countdown.suspend();
        self.input.clear();
        self.events.push(GameEvent::Paused);
        true
    }

    /// `Paused -> Playing`; the countdown continues from the paused value
    pub fn resume(&mut self) -> bool {
        if self.torn_down || self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Playing;
        self.countdown.resume();
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Countdown the platform clock should be armed for
    pub fn active_countdown(&self) -> Option<CountdownId> {
        if self.torn_down {
            None
        } else {
            self.countdown.active()
        }
    }

    /// One second of the countdown clock elapsed for run `id`
    pub fn countdown_tick(&mut self, id: CountdownId, now_ms: f64) -> CountdownTick {
        if self.torn_down {
            return CountdownTick::Stale;
        }
        let tick = self.countdown.on_second(id);
        if tick == CountdownTick::Expired {
            self.resolve(Trigger::Timeout, now_ms);
        }
        tick
    }

    /// Choose an option at the question prompt
    pub fn answer(&mut self, index: usize, now_ms: f64) -> bool {
        self.resolve(Trigger::Answer { index }, now_ms)
    }

    /// Apply a trigger if no other transition is in flight.
    ///
    /// Returns true if the trigger caused a transition.
    pub fn resolve(&mut self, trigger: Trigger, now_ms: f64) -> bool {
        if self.torn_down {
            return false;
        }
        if let Trigger::Answer { index } = trigger {
            return self.resolve_answer(index, now_ms);
        }
        if self.phase != Phase::Playing {
            log::debug!("{:?} ignored in phase {}", trigger, self.phase.as_str());
            return false;
        }
        if !self.lock.engage() {
            log::debug!("{:?} swallowed: transition already in flight", trigger);
            return false;
        }
        self.countdown.cancel();
        self.input.clear();

        match trigger {
            Trigger::Hit { correct: true } => self.succeed(now_ms),
            Trigger::Hit { correct: false } => self.fail(Failure::WrongHit, now_ms),
            Trigger::HazardContact => self.end(false),
            Trigger::Timeout => match G::ON_TIMEOUT {
                TimeoutOutcome::AsWrong => self.fail(Failure::Timeout, now_ms),
                TimeoutOutcome::AskQuestion => self.ask_question(),
            },
            Trigger::Answer { .. } => {}
        }
        true
    }

    fn resolve_answer(&mut self, index: usize, now_ms: f64) -> bool {
        if self.phase != Phase::Question {
            return false;
        }
        let Some(correct) = self.game.check_answer(self.level, index) else {
            return false;
        };

        if correct {
            self.award();
            if self.is_last_level() {
                self.end(true);
            } else {
                self.level += 1;
                self.begin_level(false);
            }
        } else {
            self.fail(Failure::WrongAnswer, now_ms);
        }
        true
    }

    fn is_last_level(&self) -> bool {
        self.game
            .level_count()
            .is_some_and(|count| self.level >= count)
    }

    fn award(&mut self) {
        self.score += CORRECT_REWARD;
        self.events.push(GameEvent::Correct {
            level: self.level,
            score: self.score,
        });
    }

    fn succeed(&mut self, now_ms: f64) {
        self.award();
        if self.is_last_level() {
            self.end(true);
            return;
        }
        self.phase = Phase::Transitioning;
        self.pending = Some(PendingTransition {
            kind: PendingKind::Advance,
            due_ms: now_ms + G::ADVANCE_DELAY_MS,
        });
    }

    fn fail(&mut self, failure: Failure, now_ms: f64) {
        if G::ON_WRONG == WrongOutcome::LoseLife {
            self.lives = self.lives.map(|n| n.saturating_sub(1));
        }
        self.events.push(match failure {
            Failure::Timeout => GameEvent::TimeUp { lives: self.lives },
            Failure::WrongHit | Failure::WrongAnswer => GameEvent::Wrong { lives: self.lives },
        });

        let out_of_lives = G::ON_WRONG == WrongOutcome::LoseLife && self.lives == Some(0);
        if G::ON_WRONG == WrongOutcome::EndGame || out_of_lives {
            self.end(false);
            return;
        }
        self.phase = Phase::Transitioning;
        self.pending = Some(PendingTransition {
            kind: PendingKind::Retry,
            due_ms: now_ms + G::RETRY_DELAY_MS,
        });
    }

    fn ask_question(&mut self) {
        self.phase = Phase::Question;
        self.input.clear();
        self.events.push(GameEvent::QuestionPrompt { level: self.level });
    }

    fn end(&mut self, won: bool) {
        self.phase = Phase::GameOver;
        self.won = won;
        self.countdown.cancel();
        self.pending = None;
        self.input.clear();
        self.lock.release();
        self.events.push(GameEvent::GameOver {
            won,
            level: self.level,
            score: self.score,
        });
        log::info!(
            "Game over ({}) at level {} with score {}",
            if won { "won" } else { "lost" },
            self.level,
            self.score
        );
    }

    /// Spawn the current level, restart the countdown and unlock
    fn begin_level(&mut self, retry: bool) {
        let mut ctx = SpawnContext {
            level: self.level,
            retry,
            speed_scale: self.tuning.speed_scale,
            rng: &mut self.rng,
        };
        self.game.spawn_level(&mut ctx);
        self.input.rearm();

        let limit = self.tuning.scaled_limit(self.game.time_limit(self.level));
        self.countdown.restart(limit);
        self.pending = None;
        self.phase = Phase::Playing;
        self.lock.release();
        self.events.push(GameEvent::LevelStarted {
            level: self.level,
            retry,
        });
        log::info!(
            "Level {} {} ({}s)",
            self.level,
            if retry { "restarted" } else { "started" },
            limit
        );
    }

    /// Finish a delayed transition once its deadline has passed
    pub(crate) fn complete_pending(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Transitioning {
            return false;
        }
        let Some(pending) = self.pending else {
            return false;
        };
        if now_ms < pending.due_ms {
            return false;
        }
        match pending.kind {
            PendingKind::Advance => {
                self.level += 1;
                self.begin_level(false);
            }
            PendingKind::Retry => self.begin_level(true),
        }
        true
    }

    /// Release everything that could still fire into this session.
    ///
    /// Safe to call repeatedly; only the first call changes anything.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.countdown.cancel();
        self.pending = None;
        self.input.clear();
        self.lock.release();
        self.events.clear();
        self.torn_down = true;
        log::info!("Session torn down at level {}", self.level);
        true
    }
}
