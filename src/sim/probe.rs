//! Scripted variant for exercising the shared session machinery

use glam::Vec2;
use rand_pcg::Pcg32;

use super::entity::Bounds;
use super::variant::{Prompt, SpawnContext, StepInput, TimeoutOutcome, Trigger, Variant, WrongOutcome};

/// Two levels, two lives, timeout counts as wrong
#[derive(Debug, Clone, Default)]
pub struct Probe {
    /// `(level, retry)` for every spawn
    pub spawns: Vec<(u32, bool)>,
    /// Directions seen by `integrate`
    pub moves: Vec<Vec2>,
    pub shots: u32,
    /// Reported by the next `collide`
    pub next: Option<Trigger>,
}

impl Variant for Probe {
    const STARTING_LIVES: Option<u8> = Some(2);
    const ADVANCE_DELAY_MS: f64 = 600.0;
    const RETRY_DELAY_MS: f64 = 800.0;
    const ON_WRONG: WrongOutcome = WrongOutcome::LoseLife;
    const ON_TIMEOUT: TimeoutOutcome = TimeoutOutcome::AsWrong;

    fn playfield(&self) -> Bounds {
        Bounds::from_size(100.0, 100.0)
    }

    fn level_count(&self) -> Option<u32> {
        Some(2)
    }

    fn time_limit(&self, _level: u32) -> u32 {
        10
    }

    fn reset(&mut self) {
        self.spawns.clear();
        self.moves.clear();
        self.shots = 0;
        self.next = None;
    }

    fn spawn_level(&mut self, ctx: &mut SpawnContext<'_>) {
        self.spawns.push((ctx.level, ctx.retry));
    }

    fn fire(&mut self) -> bool {
        self.shots += 1;
        true
    }

    fn integrate(&mut self, input: &StepInput, _dt: f32, _rng: &mut Pcg32) {
        self.moves.push(input.direction);
    }

    fn collide(&mut self) -> Option<Trigger> {
        self.next.take()
    }

    fn prompt(&self, _level: u32) -> Option<Prompt<'_>> {
        None
    }
}

impl crate::renderer::Draw for Probe {
    const TITLE: &'static str = "Probe";
    const INSTRUCTIONS: &'static str = "";

    fn draw(&self, scene: &mut crate::renderer::Scene) {
        scene.rect(Vec2::ZERO, Vec2::splat(10.0), crate::renderer::Role::Player);
    }
}
