//! Entity store primitives: playfield bounds, bodies and kinematics
//!
//! Every entity is anchored at `pos`: circles at their centre, rectangles at
//! their top-left corner. Canvas coordinates, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Shape;

/// Axis-aligned region an entity is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Region starting at the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether a point lies inside, allowing `margin` pixels of slack
    pub fn contains(&self, p: Vec2, margin: f32) -> bool {
        p.x >= self.min.x - margin
            && p.x <= self.max.x + margin
            && p.y >= self.min.y - margin
            && p.y <= self.max.y + margin
    }
}

/// Axes on which an entity bounces off the playfield edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axes {
    pub x: bool,
    pub y: bool,
}

impl Axes {
    pub const X: Axes = Axes { x: true, y: false };
    pub const BOTH: Axes = Axes { x: true, y: true };
}

/// Body of an entity relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Body {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

impl Body {
    /// World-space collision shape with the anchor at `pos`
    pub fn shape_at(&self, pos: Vec2) -> Shape {
        match *self {
            Body::Circle { radius } => Shape::Circle {
                center: pos,
                radius,
            },
            Body::Rect { size } => Shape::Rect { min: pos, size },
        }
    }

    /// Range the anchor may occupy while the body stays inside `bounds`
    pub fn anchor_range(&self, bounds: &Bounds) -> (Vec2, Vec2) {
        match *self {
            Body::Circle { radius } => (bounds.min + radius, bounds.max - radius),
            Body::Rect { size } => (bounds.min, bounds.max - size),
        }
    }
}

/// Hands out entity IDs in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The player's gun or avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    #[inline]
    pub fn centre(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn shape(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Move along the held direction, clamping the anchor to `[lo, hi]`
    pub fn steer(&mut self, direction: Vec2, dt: f32, lo: Vec2, hi: Vec2) {
        self.pos += direction * self.speed * dt;
        self.pos = self.pos.clamp(lo, hi);
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub body: Body,
}

impl Projectile {
    pub fn shape(&self) -> Shape {
        self.body.shape_at(self.pos)
    }

    /// Whether the projectile has fully left `bounds` along its firing axis
    pub fn exited(&self, bounds: &Bounds) -> bool {
        let (min, max) = self.shape().aabb();
        if self.vel.y < 0.0 {
            max.y <= bounds.min.y
        } else if self.vel.y > 0.0 {
            min.y >= bounds.max.y
        } else if self.vel.x < 0.0 {
            max.x <= bounds.min.x
        } else {
            min.x >= bounds.max.x
        }
    }
}

/// Move projectiles and drop the ones that left the playfield
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, bounds: &Bounds, dt: f32) {
    for p in projectiles.iter_mut() {
        p.pos += p.vel * dt;
    }
    projectiles.retain(|p| !p.exited(bounds));
}

/// A labelled answer target (bubble or date tile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub body: Body,
    pub label: String,
    pub correct: bool,
    /// Axes on which the target bounces
    pub axes: Axes,
    /// Struck targets stay in the store but no longer move or collide
    pub struck: bool,
}

impl Target {
    pub fn shape(&self) -> Shape {
        self.body.shape_at(self.pos)
    }

    /// Integrate and bounce inside `bounds`
    pub fn advance(&mut self, bounds: &Bounds, dt: f32) -> bool {
        if self.struck {
            return false;
        }
        let (lo, hi) = self.body.anchor_range(bounds);
        integrate_reflecting(&mut self.pos, &mut self.vel, lo, hi, self.axes, dt)
    }
}

/// Advance `pos` by `vel * dt`, then reflect off `[lo, hi]` on the given axes.
///
/// Reflection is perfectly elastic: the velocity component is turned back
/// toward the interior and the position is clamped onto the edge. Returns
/// true if any bounce happened.
pub fn integrate_reflecting(
    pos: &mut Vec2,
    vel: &mut Vec2,
    lo: Vec2,
    hi: Vec2,
    axes: Axes,
    dt: f32,
) -> bool {
    *pos += *vel * dt;
    let mut bounced = false;

    if axes.x {
        if pos.x < lo.x {
            pos.x = lo.x;
            vel.x = vel.x.abs();
            bounced = true;
        } else if pos.x > hi.x {
            pos.x = hi.x;
            vel.x = -vel.x.abs();
            bounced = true;
        }
    }
    if axes.y {
        if pos.y < lo.y {
            pos.y = lo.y;
            vel.y = vel.y.abs();
            bounced = true;
        } else if pos.y > hi.y {
            pos.y = hi.y;
            vel.y = -vel.y.abs();
            bounced = true;
        }
    }

    bounced
}
