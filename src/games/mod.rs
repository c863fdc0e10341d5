//! The three games built on the shared session machinery
//!
//! Each game is a [`Variant`](crate::sim::Variant) plugged into a
//! [`Session`]. [`AnySession`] lets the platform host whichever one was
//! selected without being generic itself.

pub mod date_shooter;
pub mod math_bubbles;
pub mod survival;

pub use date_shooter::DateShooter;
pub use math_bubbles::MathBubbles;
pub use survival::Survival;

use serde::{Deserialize, Serialize};

use crate::platform::query_param;
use crate::renderer::{Draw, Scene};
use crate::scheduler::Simulation;
use crate::settings::Settings;
use crate::sim::{CountdownId, CountdownTick, GameEvent, Key, Phase, Session};

/// Which game to mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    DateShooter,
    MathBubbles,
    Survival,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [
        GameKind::DateShooter,
        GameKind::MathBubbles,
        GameKind::Survival,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::DateShooter => "history",
            GameKind::MathBubbles => "math",
            GameKind::Survival => "survival",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" | "dates" => Some(GameKind::DateShooter),
            "math" | "bubbles" => Some(GameKind::MathBubbles),
            "survival" | "science" => Some(GameKind::Survival),
            _ => None,
        }
    }

    /// Read `game=` from a URL query string such as `?game=math&x=1`
    pub fn from_query(query: &str) -> Option<Self> {
        query_param(query, "game").and_then(Self::from_str)
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::DateShooter => DateShooter::TITLE,
            GameKind::MathBubbles => MathBubbles::TITLE,
            GameKind::Survival => Survival::TITLE,
        }
    }
}

/// A session of any of the three games
#[derive(Debug, Clone)]
pub enum AnySession {
    DateShooter(Session<DateShooter>),
    MathBubbles(Session<MathBubbles>),
    Survival(Session<Survival>),
}

macro_rules! each {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            AnySession::DateShooter($s) => $body,
            AnySession::MathBubbles($s) => $body,
            AnySession::Survival($s) => $body,
        }
    };
}

impl AnySession {
    /// Mount `kind` with the built-in question bank
    pub fn new(kind: GameKind, settings: &Settings, seed: u64) -> Self {
        match kind {
            GameKind::DateShooter => {
                AnySession::DateShooter(Session::new(DateShooter::default(), settings, seed))
            }
            GameKind::MathBubbles => {
                AnySession::MathBubbles(Session::new(MathBubbles::default(), settings, seed))
            }
            GameKind::Survival => {
                AnySession::Survival(Session::new(Survival::default(), settings, seed))
            }
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            AnySession::DateShooter(_) => GameKind::DateShooter,
            AnySession::MathBubbles(_) => GameKind::MathBubbles,
            AnySession::Survival(_) => GameKind::Survival,
        }
    }

    pub fn start(&mut self) -> bool {
        each!(self, s => s.start())
    }

    pub fn reset(&mut self) {
        each!(self, s => s.reset())
    }

    pub fn key_down(&mut self, key: Key, now_ms: f64) {
        each!(self, s => s.key_down(key, now_ms))
    }

    pub fn key_up(&mut self, key: Key) {
        each!(self, s => s.key_up(key))
    }

    pub fn toggle_pause(&mut self) -> bool {
        each!(self, s => s.toggle_pause())
    }

    pub fn pause(&mut self) -> bool {
        each!(self, s => s.pause())
    }

    /// Pick option `index` at the question prompt
    pub fn answer(&mut self, index: usize, now_ms: f64) -> bool {
        each!(self, s => s.answer(index, now_ms))
    }

    pub fn active_countdown(&self) -> Option<CountdownId> {
        each!(self, s => s.active_countdown())
    }

    pub fn countdown_tick(&mut self, id: CountdownId, now_ms: f64) -> CountdownTick {
        each!(self, s => s.countdown_tick(id, now_ms))
    }

    pub fn teardown(&mut self) -> bool {
        each!(self, s => s.teardown())
    }

    pub fn phase(&self) -> Phase {
        each!(self, s => s.phase())
    }

    pub fn level(&self) -> u32 {
        each!(self, s => s.level())
    }

    pub fn score(&self) -> u64 {
        each!(self, s => s.score())
    }

    pub fn lives(&self) -> Option<u8> {
        each!(self, s => s.lives())
    }

    pub fn won(&self) -> bool {
        each!(self, s => s.won())
    }

    pub fn time_left(&self) -> u32 {
        each!(self, s => s.time_left())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        each!(self, s => s.drain_events())
    }
}

impl Simulation for AnySession {
    fn step(&mut self, dt: f32, now_ms: f64) -> bool {
        each!(self, s => s.step(dt, now_ms))
    }

    fn accumulates(&self) -> bool {
        each!(self, s => s.accumulates())
    }

    fn is_torn_down(&self) -> bool {
        each!(self, s => s.is_torn_down())
    }

    fn capture(&self) -> Scene {
        each!(self, s => Scene::capture(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str(" Science "), Some(GameKind::Survival));
        assert_eq!(GameKind::from_str("chess"), None);
    }

    #[test]
    fn test_kind_from_query() {
        assert_eq!(GameKind::from_query("?game=math"), Some(GameKind::MathBubbles));
        assert_eq!(
            GameKind::from_query("?debug=1&game=history"),
            Some(GameKind::DateShooter)
        );
        assert_eq!(GameKind::from_query("?game="), None);
        assert_eq!(GameKind::from_query(""), None);
    }

    #[test]
    fn test_each_kind_mounts_in_menu() {
        let settings = Settings::default();
        for kind in GameKind::ALL {
            let session = AnySession::new(kind, &settings, 9);
            assert_eq!(session.kind(), kind);
            assert_eq!(session.phase(), Phase::Menu);
            assert_eq!(session.level(), 1);
            assert_eq!(session.score(), 0);
            assert_eq!(session.capture().hud.title, kind.title());
        }
    }

    #[test]
    fn test_lives_per_game() {
        let settings = Settings::default();
        let lives: Vec<_> = GameKind::ALL
            .iter()
            .map(|&k| AnySession::new(k, &settings, 1).lives())
            .collect();
        assert_eq!(lives, vec![Some(3), None, None]);
    }

    #[test]
    fn test_start_arms_countdown() {
        let mut session = AnySession::new(GameKind::MathBubbles, &Settings::default(), 4);
        assert!(session.active_countdown().is_none());
        assert!(session.start());
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.active_countdown().is_some());
        assert_eq!(session.time_left(), 15);
        assert!(session.accumulates());
    }

    #[test]
    fn test_teardown_silences_session() {
        let mut session = AnySession::new(GameKind::Survival, &Settings::default(), 4);
        session.start();
        let id = session.active_countdown().unwrap();
        assert!(session.teardown());
        assert!(!session.teardown());
        assert!(session.is_torn_down());
        assert_eq!(session.countdown_tick(id, 0.0), CountdownTick::Stale);
        assert!(!session.step(crate::consts::SIM_DT, 0.0));
    }
}
