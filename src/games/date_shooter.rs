//! History date shooter
//!
//! Date tiles slide left and right across the top of the field; the player
//! moves a gun along the bottom and shoots the tile showing the right year.
//! Questions are played in bank order, three lives for the whole run.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::content::{ChoiceQuestion, QuestionBank, history_bank};
use crate::renderer::{Draw, Role, Scene};
use crate::sim::collision::first_contact;
use crate::sim::entity::advance_projectiles;
use crate::sim::{
    Axes, Body, Bounds, EntityIds, Player, Projectile, Prompt, SpawnContext, StepInput, Target,
    TimeoutOutcome, Trigger, Variant, WrongOutcome,
};
use crate::{rand_range, rand_sign};

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 500.0;

const PLAYER_START: Vec2 = Vec2::new(375.0, 460.0);
const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 20.0);
const PLAYER_SPEED: f32 = 420.0;

const BULLET_SIZE: Vec2 = Vec2::new(5.0, 10.0);
const BULLET_SPEED: f32 = 480.0;

const TILE_SIZE: Vec2 = Vec2::new(120.0, 50.0);
const TILE_Y: f32 = 100.0;
/// Tile speed unit (px/s); multiplied by the level factor
const TILE_SPEED: f32 = 60.0;
const TILE_SPEED_PER_LEVEL: f32 = 0.5;
const TILE_SPEED_JITTER: f32 = 1.5;

const FIRST_LEVEL_SECONDS: u32 = 20;
const SECONDS_LOST_PER_LEVEL: u32 = 2;
const MIN_LEVEL_SECONDS: u32 = 10;

#[derive(Debug, Clone)]
pub struct DateShooter {
    bank: QuestionBank<ChoiceQuestion>,
    pub player: Player,
    pub bullets: Vec<Projectile>,
    pub tiles: Vec<Target>,
    ids: EntityIds,
}

impl Default for DateShooter {
    fn default() -> Self {
        Self::new(history_bank())
    }
}

impl DateShooter {
    pub fn new(bank: QuestionBank<ChoiceQuestion>) -> Self {
        Self {
            bank,
            player: Player::new(PLAYER_START, PLAYER_SIZE, PLAYER_SPEED),
            bullets: Vec::new(),
            tiles: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    pub fn question(&self, level: u32) -> Option<&ChoiceQuestion> {
        self.bank.get(level.checked_sub(1)? as usize)
    }

    pub fn bank(&self) -> &QuestionBank<ChoiceQuestion> {
        &self.bank
    }
}

impl Variant for DateShooter {
    const STARTING_LIVES: Option<u8> = Some(3);
    const ADVANCE_DELAY_MS: f64 = 600.0;
    const RETRY_DELAY_MS: f64 = 800.0;
    const ON_WRONG: WrongOutcome = WrongOutcome::LoseLife;
    const ON_TIMEOUT: TimeoutOutcome = TimeoutOutcome::AsWrong;

    fn playfield(&self) -> Bounds {
        Bounds::from_size(WIDTH, HEIGHT)
    }

    fn level_count(&self) -> Option<u32> {
        Some(self.bank.len() as u32)
    }

    fn time_limit(&self, level: u32) -> u32 {
        FIRST_LEVEL_SECONDS
            .saturating_sub(SECONDS_LOST_PER_LEVEL * level.saturating_sub(1))
            .max(MIN_LEVEL_SECONDS)
    }

    fn reset(&mut self) {
        self.player = Player::new(PLAYER_START, PLAYER_SIZE, PLAYER_SPEED);
        self.bullets.clear();
        self.tiles.clear();
        self.ids = EntityIds::default();
    }

    fn spawn_level(&mut self, ctx: &mut SpawnContext<'_>) {
        self.bullets.clear();
        self.tiles.clear();

        let Some(question) = self.bank.get(ctx.level.saturating_sub(1) as usize) else {
            log::warn!("No history question for level {}", ctx.level);
            return;
        };

        let gap = WIDTH / (question.options.len() + 1) as f32;
        let level_factor = 1.0 + (ctx.level - 1) as f32 * TILE_SPEED_PER_LEVEL;

        for (i, option) in question.options.iter().enumerate() {
            let speed = (level_factor + rand_range(ctx.rng, 0.0, TILE_SPEED_JITTER))
                * TILE_SPEED
                * ctx.speed_scale;
            let center_x = gap * (i + 1) as f32;
            self.tiles.push(Target {
                id: self.ids.next(),
                pos: Vec2::new(center_x - TILE_SIZE.x / 2.0, TILE_Y),
                vel: Vec2::new(speed * rand_sign(ctx.rng), 0.0),
                body: Body::Rect { size: TILE_SIZE },
                label: option.clone(),
                correct: question.is_correct(i),
                axes: Axes::X,
                struck: false,
            });
        }
    }

    fn fire(&mut self) -> bool {
        let muzzle = Vec2::new(
            self.player.centre().x - 2.0,
            self.player.pos.y - BULLET_SIZE.y,
        );
        self.bullets.push(Projectile {
            id: self.ids.next(),
            pos: muzzle,
            vel: Vec2::new(0.0, -BULLET_SPEED),
            body: Body::Rect { size: BULLET_SIZE },
        });
        true
    }

    fn integrate(&mut self, input: &StepInput, dt: f32, _rng: &mut Pcg32) {
        let field = self.playfield();
        let y = self.player.pos.y;
        self.player.steer(
            Vec2::new(input.direction.x, 0.0),
            dt,
            Vec2::new(0.0, y),
            Vec2::new(WIDTH - PLAYER_SIZE.x, y),
        );
        advance_projectiles(&mut self.bullets, &field, dt);
        for tile in &mut self.tiles {
            tile.advance(&field, dt);
        }
    }

    fn collide(&mut self) -> Option<Trigger> {
        let contact = first_contact(&self.bullets, &self.tiles)?;
        self.bullets.remove(contact.first);
        let tile = &mut self.tiles[contact.second];
        tile.struck = true;
        Some(Trigger::Hit {
            correct: tile.correct,
        })
    }

    fn prompt(&self, level: u32) -> Option<Prompt<'_>> {
        self.question(level).map(|q| Prompt {
            text: &q.prompt,
            options: &q.options,
        })
    }
}

impl Draw for DateShooter {
    const TITLE: &'static str = "History Date Shooter";
    const INSTRUCTIONS: &'static str =
        "Use ← → or A D to move, SPACE to shoot. Hit the correct historical date!";

    fn draw(&self, scene: &mut Scene) {
        let p = &self.player;
        scene.rect(p.pos, p.size, Role::Player);
        scene.rect(
            Vec2::new(p.centre().x - 5.0, p.pos.y - 20.0),
            Vec2::new(10.0, 20.0),
            Role::Player,
        );
        scene.rect(
            Vec2::new(p.centre().x - 2.0, p.pos.y - 25.0),
            Vec2::new(4.0, 5.0),
            Role::Barrel,
        );

        for tile in self.tiles.iter().filter(|t| !t.struck) {
            scene.rect(tile.pos, TILE_SIZE, Role::Tile);
            scene.label(&tile.label, tile.pos + TILE_SIZE / 2.0, 18.0, true);
        }

        for bullet in &self.bullets {
            scene.rect(bullet.pos, BULLET_SIZE, Role::Projectile);
        }
    }
}
