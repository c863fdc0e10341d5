//! Science survival
//!
//! The player dodges hazards streaming in from the edges until the
//! countdown runs out, then answers a multiple-choice science question.
//! A right answer starts the next, faster level at once; a wrong answer or
//! any hazard contact ends the run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::content::{ChoiceQuestion, QuestionBank, science_bank};
use crate::renderer::{Draw, Role, Scene};
use crate::sim::collision::first_touching;
use crate::sim::{
    Bounds, Collider, Player, Prompt, Shape, SpawnContext, StepInput, TimeoutOutcome, Trigger,
    Variant, WrongOutcome,
};
use crate::{rand_range, rand_sign};

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;

const PLAYER_START: Vec2 = Vec2::new(400.0, 300.0);
const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 60.0);
const PLAYER_SPEED: f32 = 300.0;

const HAZARDS_PER_LEVEL: usize = 5;
/// Hazard speed unit (px/s)
const HAZARD_SPEED: f32 = 60.0;
const BASE_HAZARD_FACTOR: f32 = 2.0;
/// How far past the edge a hazard may drift before it is replaced
const EXIT_MARGIN: f32 = 10.0;
/// Drawn radius; the hitbox is the centre point
const HAZARD_RADIUS: f32 = 10.0;

const LEVEL_SECONDS: u32 = 15;

/// A projectile fired in from the playfield edge
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub pos: Vec2,
    /// Unit components on each axis, scaled by the level speed
    pub vel: Vec2,
}

impl Collider for Hazard {
    fn shape(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

fn spawn_hazard(rng: &mut Pcg32, speed: f32) -> Hazard {
    let edge = EDGES[rng.random_range(0..EDGES.len())];
    let (pos, dir) = match edge {
        Edge::Top => (Vec2::new(rand_range(rng, 0.0, WIDTH), 0.0), Vec2::new(rand_sign(rng), 1.0)),
        Edge::Bottom => (
            Vec2::new(rand_range(rng, 0.0, WIDTH), HEIGHT),
            Vec2::new(rand_sign(rng), -1.0),
        ),
        Edge::Left => (Vec2::new(0.0, rand_range(rng, 0.0, HEIGHT)), Vec2::new(1.0, rand_sign(rng))),
        Edge::Right => (
            Vec2::new(WIDTH, rand_range(rng, 0.0, HEIGHT)),
            Vec2::new(-1.0, rand_sign(rng)),
        ),
    };
    Hazard {
        pos,
        vel: dir * speed,
    }
}

#[derive(Debug, Clone)]
pub struct Survival {
    bank: QuestionBank<ChoiceQuestion>,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    /// Level the hazards were spawned for
    level: u32,
    /// Current hazard speed (px/s)
    hazard_speed: f32,
}

impl Default for Survival {
    fn default() -> Self {
        Self::new(science_bank())
    }
}

impl Survival {
    pub fn new(bank: QuestionBank<ChoiceQuestion>) -> Self {
        Self {
            bank,
            player: Player::new(PLAYER_START, PLAYER_SIZE, PLAYER_SPEED),
            hazards: Vec::new(),
            level: 1,
            hazard_speed: BASE_HAZARD_FACTOR * HAZARD_SPEED,
        }
    }

    /// Question asked when `level`'s countdown expires
    pub fn question(&self, level: u32) -> &ChoiceQuestion {
        self.bank.cycled(level)
    }

    pub fn hazard_speed(&self) -> f32 {
        self.hazard_speed
    }
}

impl Variant for Survival {
    const STARTING_LIVES: Option<u8> = None;
    const ADVANCE_DELAY_MS: f64 = 0.0;
    const RETRY_DELAY_MS: f64 = 0.0;
    const ON_WRONG: WrongOutcome = WrongOutcome::EndGame;
    const ON_TIMEOUT: TimeoutOutcome = TimeoutOutcome::AskQuestion;

    fn playfield(&self) -> Bounds {
        Bounds::from_size(WIDTH, HEIGHT)
    }

    fn level_count(&self) -> Option<u32> {
        None
    }

    fn time_limit(&self, _level: u32) -> u32 {
        LEVEL_SECONDS
    }

    fn reset(&mut self) {
        self.player = Player::new(PLAYER_START, PLAYER_SIZE, PLAYER_SPEED);
        self.hazards.clear();
        self.level = 1;
        self.hazard_speed = BASE_HAZARD_FACTOR * HAZARD_SPEED;
    }

    fn spawn_level(&mut self, ctx: &mut SpawnContext<'_>) {
        self.level = ctx.level;
        self.hazard_speed =
            (BASE_HAZARD_FACTOR + (ctx.level - 1) as f32) * HAZARD_SPEED * ctx.speed_scale;
        self.hazards.clear();
        for _ in 0..HAZARDS_PER_LEVEL {
            self.hazards.push(spawn_hazard(ctx.rng, self.hazard_speed));
        }
    }

    fn integrate(&mut self, input: &StepInput, dt: f32, rng: &mut Pcg32) {
        let field = self.playfield();
        self.player
            .steer(input.direction, dt, field.min, field.max - PLAYER_SIZE);

        let speed = self.hazard_speed;
        for hazard in &mut self.hazards {
            hazard.pos += hazard.vel * dt;
            if !field.contains(hazard.pos, EXIT_MARGIN) {
                *hazard = spawn_hazard(rng, speed);
            }
        }
    }

    fn collide(&mut self) -> Option<Trigger> {
        first_touching(&self.hazards, &self.player).map(|_| Trigger::HazardContact)
    }

    fn prompt(&self, level: u32) -> Option<Prompt<'_>> {
        let q = self.question(level);
        Some(Prompt {
            text: &q.prompt,
            options: &q.options,
        })
    }

    fn check_answer(&self, level: u32, index: usize) -> Option<bool> {
        let q = self.question(level);
        (index < q.options.len()).then(|| q.is_correct(index))
    }
}

impl Draw for Survival {
    const TITLE: &'static str = "Science Survival";
    const INSTRUCTIONS: &'static str = "Use arrow keys to move. Avoid the bullets!";

    fn draw(&self, scene: &mut Scene) {
        scene.rect(self.player.pos, self.player.size, Role::Player);
        for (i, hazard) in self.hazards.iter().enumerate() {
            let hue = ((self.level as usize * 30 + i * 20) % 360) as u16;
            scene.circle(hazard.pos, HAZARD_RADIUS, Role::Hazard { hue });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CORRECT_REWARD, SIM_DT};
    use crate::sim::{CountdownTick, GameEvent, Key, Phase, Session, Tuning, tick};
    use rand::SeedableRng;

    fn session(seed: u64) -> Session<Survival> {
        let mut s = Session::with_tuning(Survival::default(), Tuning::default(), seed);
        s.start();
        s
    }

    fn run_out_clock(s: &mut Session<Survival>) {
        let id = s.active_countdown().unwrap();
        for _ in 0..14 {
            s.countdown_tick(id, 0.0);
        }
        assert_eq!(s.countdown_tick(id, 0.0), CountdownTick::Expired);
    }

    #[test]
    fn test_hazards_spawn_on_edges_heading_inward() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..100 {
            let h = spawn_hazard(&mut rng, 120.0);
            assert_eq!(h.vel.x.abs(), 120.0);
            assert_eq!(h.vel.y.abs(), 120.0);
            let on_edge = h.pos.x == 0.0 || h.pos.x == WIDTH || h.pos.y == 0.0 || h.pos.y == HEIGHT;
            assert!(on_edge);
            if h.pos.y == 0.0 && h.pos.x > 0.0 && h.pos.x < WIDTH {
                assert!(h.vel.y > 0.0);
            }
            if h.pos.x == WIDTH {
                assert!(h.vel.x < 0.0);
            }
        }
    }

    #[test]
    fn test_level_speed() {
        let mut s = session(1);
        assert_eq!(s.game.hazards.len(), 5);
        assert_eq!(s.game.hazard_speed(), 120.0);

        run_out_clock(&mut s);
        assert!(s.answer(s.game.question(1).answer, 0.0));
        assert_eq!(s.level(), 2);
        assert_eq!(s.game.hazard_speed(), 180.0);
    }

    #[test]
    fn test_hazard_inside_player_ends_game() {
        let mut s = session(2);
        s.game.hazards = vec![Hazard {
            pos: Vec2::new(430.0, 330.0),
            vel: Vec2::ZERO,
        }];
        assert!(tick(&mut s, SIM_DT, 0.0));
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.won());
        assert_eq!(
            s.events().last(),
            Some(&GameEvent::GameOver {
                won: false,
                level: 1,
                score: 0
            })
        );
        assert_eq!(s.active_countdown(), None);
    }

    #[test]
    fn test_hazard_on_player_edge_is_a_miss() {
        let mut s = session(2);
        s.game.hazards = vec![Hazard {
            pos: Vec2::new(400.0, 330.0),
            vel: Vec2::ZERO,
        }];
        assert!(!tick(&mut s, SIM_DT, 0.0));
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_exited_hazard_is_replaced() {
        let mut g = Survival::default();
        let mut rng = Pcg32::seed_from_u64(8);
        g.hazards = vec![Hazard {
            pos: Vec2::new(-9.0, 300.0),
            vel: Vec2::new(-120.0, 120.0),
        }];
        g.integrate(&StepInput::default(), 0.1, &mut rng);
        let h = &g.hazards[0];
        assert!(g.playfield().contains(h.pos, 0.0));
        assert_eq!(g.hazards.len(), 1);
    }

    #[test]
    fn test_timeout_opens_question() {
        let mut s = session(3);
        run_out_clock(&mut s);
        assert_eq!(s.phase(), Phase::Question);
        assert!(s.is_locked());
        assert!(s.events().contains(&GameEvent::QuestionPrompt { level: 1 }));

        // Frozen while the prompt is open
        let before = s.game.hazards.clone();
        s.key_down(Key::Left, 0.0);
        tick(&mut s, SIM_DT, 10.0);
        assert_eq!(s.game.hazards, before);
    }

    #[test]
    fn test_correct_answer_respawns_immediately() {
        let mut s = session(3);
        let start = s.game.player.pos;
        s.game.player.pos = Vec2::new(100.0, 100.0);
        run_out_clock(&mut s);

        let q = s.game.question(1).clone();
        assert_eq!(q.prompt, "What part of the plant makes food?");
        assert!(s.answer(q.answer, 0.0));

        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.level(), 2);
        assert_eq!(s.score(), CORRECT_REWARD);
        assert_eq!(s.time_left(), 15);
        assert!(!s.is_locked());
        assert_ne!(s.game.player.pos, start);
        assert_eq!(s.game.player.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_wrong_answer_ends_game() {
        let mut s = session(3);
        run_out_clock(&mut s);
        let wrong = (s.game.question(1).answer + 1) % 4;
        assert!(s.answer(wrong, 0.0));
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.won());
    }

    #[test]
    fn test_answers_only_at_the_prompt() {
        let mut s = session(3);
        assert!(!s.answer(2, 0.0));
        run_out_clock(&mut s);
        assert!(!s.answer(9, 0.0));
        assert_eq!(s.phase(), Phase::Question);
    }

    #[test]
    fn test_questions_wrap_around_the_bank() {
        let g = Survival::default();
        assert_eq!(g.question(16), g.question(1));
    }

    #[test]
    fn test_player_moves_in_four_directions_clamped() {
        let mut g = Survival::default();
        let mut rng = Pcg32::seed_from_u64(0);
        g.hazards.clear();
        let up_left = StepInput {
            direction: Vec2::new(-1.0, -1.0),
            fire: false,
        };
        for _ in 0..600 {
            g.integrate(&up_left, SIM_DT, &mut rng);
        }
        assert_eq!(g.player.pos, Vec2::ZERO);

        let down_right = StepInput {
            direction: Vec2::new(1.0, 1.0),
            fire: false,
        };
        for _ in 0..600 {
            g.integrate(&down_right, SIM_DT, &mut rng);
        }
        assert_eq!(g.player.pos, Vec2::new(740.0, 540.0));
    }
}
