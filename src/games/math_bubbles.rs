//! Math bubble shooter
//!
//! Three or four answer bubbles drift around the upper half of the field.
//! One shows the answer to the current arithmetic question, the rest are
//! generated distractors. Levels never run out; a wrong hit or a timeout
//! replays the same question with fresh bubbles.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::content::{NumericQuestion, QuestionBank, math_bank};
use crate::rand_range;
use crate::renderer::{Draw, Role, Scene};
use crate::sim::collision::first_contact;
use crate::sim::distractor::numeric_distractors;
use crate::sim::entity::advance_projectiles;
use crate::sim::{
    Axes, Body, Bounds, EntityIds, Player, Projectile, Prompt, SpawnContext, StepInput, Target,
    TimeoutOutcome, Trigger, Variant, WrongOutcome,
};

pub const WIDTH: f32 = 700.0;
pub const HEIGHT: f32 = 600.0;

const GUN_SIZE: Vec2 = Vec2::new(36.0, 18.0);
const GUN_START: Vec2 = Vec2::new(350.0 - 18.0, 564.0);
const GUN_SPEED: f32 = 360.0;
/// Closest the gun centre gets to a side wall
const GUN_MARGIN: f32 = 24.0;

const BULLET_RADIUS: f32 = 6.0;
const BULLET_SPEED: f32 = 600.0;

const BUBBLE_RADIUS: f32 = 28.0;
const MIN_BUBBLES: usize = 3;
const SPAWN_MARGIN: f32 = 60.0;
const BUBBLE_VX: f32 = 80.0;
const BUBBLE_VY: f32 = 40.0;
const SPEED_PER_LEVEL: f32 = 0.15;
/// Bubbles bounce between this ceiling and `FLOOR_FRACTION * HEIGHT`
const CEILING: f32 = 20.0;
const FLOOR_FRACTION: f32 = 0.55;
const SPAWN_FLOOR_FRACTION: f32 = 0.45;

const LEVEL_SECONDS: u32 = 15;

#[derive(Debug, Clone)]
pub struct MathBubbles {
    bank: QuestionBank<NumericQuestion>,
    /// Index of the question on screen
    current: Option<usize>,
    pub gun: Player,
    pub bullets: Vec<Projectile>,
    pub bubbles: Vec<Target>,
    ids: EntityIds,
}

impl Default for MathBubbles {
    fn default() -> Self {
        Self::new(math_bank())
    }
}

impl MathBubbles {
    pub fn new(bank: QuestionBank<NumericQuestion>) -> Self {
        Self {
            bank,
            current: None,
            gun: Player::new(GUN_START, GUN_SIZE, GUN_SPEED),
            bullets: Vec::new(),
            bubbles: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    pub fn question(&self) -> Option<&NumericQuestion> {
        self.bank.get(self.current?)
    }

    fn bubble_bounds() -> Bounds {
        Bounds::new(
            Vec2::new(0.0, CEILING),
            Vec2::new(WIDTH, HEIGHT * FLOOR_FRACTION),
        )
    }
}

impl Variant for MathBubbles {
    const STARTING_LIVES: Option<u8> = None;
    const ADVANCE_DELAY_MS: f64 = 900.0;
    const RETRY_DELAY_MS: f64 = 900.0;
    const ON_WRONG: WrongOutcome = WrongOutcome::RetryLevel;
    const ON_TIMEOUT: TimeoutOutcome = TimeoutOutcome::AsWrong;

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
        self.current = None;
        self.gun = Player::new(GUN_START, GUN_SIZE, GUN_SPEED);
        self.bullets.clear();
        self.bubbles.clear();
        self.ids = EntityIds::default();
    }

    fn spawn_level(&mut self, ctx: &mut SpawnContext<'_>) {
        self.bullets.clear();
        self.bubbles.clear();

        let index = match self.current {
            Some(index) if ctx.retry => index,
            _ => self.bank.random_index(ctx.rng),
        };
        self.current = Some(index);
        let Some(question) = self.bank.get(index) else {
            return;
        };

        let total = MIN_BUBBLES + ctx.rng.random_range(0..2);
        let correct_index = ctx.rng.random_range(0..total);
        let mut wrongs = numeric_distractors(&question.answer, total - 1, ctx.rng);
        let speed = (1.0 + (ctx.level - 1) as f32 * SPEED_PER_LEVEL) * ctx.speed_scale;

        for i in 0..total {
            let correct = i == correct_index;
            let label = if correct {
                question.answer.clone()
            } else {
                wrongs.pop().unwrap_or_default()
            };
            let pos = Vec2::new(
                rand_range(ctx.rng, SPAWN_MARGIN, WIDTH - SPAWN_MARGIN),
                rand_range(ctx.rng, SPAWN_MARGIN, HEIGHT * SPAWN_FLOOR_FRACTION),
            );
            let vel = Vec2::new(
                rand_range(ctx.rng, -BUBBLE_VX, BUBBLE_VX),
                rand_range(ctx.rng, -BUBBLE_VY, BUBBLE_VY),
            ) * speed;
            self.bubbles.push(Target {
                id: self.ids.next(),
                pos,
                vel,
                body: Body::Circle {
                    radius: BUBBLE_RADIUS,
                },
                label,
                correct,
                axes: Axes::BOTH,
                struck: false,
            });
        }
    }

    fn fire(&mut self) -> bool {
        self.bullets.push(Projectile {
            id: self.ids.next(),
            pos: Vec2::new(self.gun.centre().x, self.gun.pos.y - 10.0),
            vel: Vec2::new(0.0, -BULLET_SPEED),
            body: Body::Circle {
                radius: BULLET_RADIUS,
            },
        });
        true
    }

    fn integrate(&mut self, input: &StepInput, dt: f32, _rng: &mut Pcg32) {
        let y = self.gun.pos.y;
        let half = GUN_SIZE.x / 2.0;
        self.gun.steer(
            Vec2::new(input.direction.x, 0.0),
            dt,
            Vec2::new(GUN_MARGIN - half, y),
            Vec2::new(WIDTH - GUN_MARGIN - half, y),
        );
        let field = self.playfield();
        advance_projectiles(&mut self.bullets, &field, dt);

        let bounds = Self::bubble_bounds();
        for bubble in &mut self.bubbles {
            bubble.advance(&bounds, dt);
        }
    }

    fn collide(&mut self) -> Option<Trigger> {
        let contact = first_contact(&self.bullets, &self.bubbles)?;
        self.bullets.remove(contact.first);
        let bubble = &mut self.bubbles[contact.second];
        bubble.struck = true;
        Some(Trigger::Hit {
            correct: bubble.correct,
        })
    }

    fn prompt(&self, _level: u32) -> Option<Prompt<'_>> {
        self.question().map(|q| Prompt {
            text: &q.prompt,
            options: &[],
        })
    }
}

impl Draw for MathBubbles {
    const TITLE: &'static str = "Math Bubble Shooter";
    const INSTRUCTIONS: &'static str = "Use ← → or A D to move, Space to shoot";

    fn draw(&self, scene: &mut Scene) {
        for bubble in self.bubbles.iter().filter(|b| !b.struck) {
            scene.circle(bubble.pos, BUBBLE_RADIUS, Role::Bubble);
            scene.label(&bubble.label, bubble.pos + Vec2::new(0.0, 1.0), 16.0, false);
        }
        for bullet in &self.bullets {
            scene.circle(bullet.pos, BULLET_RADIUS, Role::Projectile);
        }
        let gun = &self.gun;
        scene.rect(gun.pos, gun.size, Role::Player);
        scene.rect(
            Vec2::new(gun.centre().x - 3.0, gun.pos.y - 8.0),
            Vec2::new(6.0, 10.0),
            Role::Barrel,
        );
    }
}
