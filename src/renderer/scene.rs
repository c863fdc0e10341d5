//! Read-only snapshot of a session for painting
//!
//! Capturing a scene never mutates the session; painting can be skipped or
//! repeated without affecting gameplay.

use glam::Vec2;

use crate::sim::{Bounds, Phase, Session, Variant};

/// What a primitive depicts; the palette maps roles to colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Barrel,
    Projectile,
    Bubble,
    Tile,
    /// Hazard with its hue in degrees
    Hazard { hue: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Circle { center: Vec2, radius: f32, role: Role },
    Rect { min: Vec2, size: Vec2, role: Role },
}

/// Text drawn centred on a point of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub center: Vec2,
    /// Font size in pixels
    pub size: f32,
    /// Dark text (on light tiles) rather than light text
    pub dark: bool,
}

/// Values shown outside the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub title: &'static str,
    pub instructions: &'static str,
    pub phase: Phase,
    pub level: u32,
    pub score: u64,
    pub lives: Option<u8>,
    pub time_left: u32,
    pub won: bool,
    pub prompt: Option<String>,
    /// Answer options, only while the question prompt is open
    pub options: Vec<String>,
}

/// Per-game drawing of entities into a scene
pub trait Draw {
    const TITLE: &'static str;
    const INSTRUCTIONS: &'static str;

    fn draw(&self, scene: &mut Scene);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub playfield: Bounds,
    pub primitives: Vec<Primitive>,
    pub labels: Vec<Label>,
    pub hud: Hud,
}

impl Scene {
    /// Snapshot everything needed to paint `session`
    pub fn capture<G: Variant + Draw>(session: &Session<G>) -> Self {
        let level = session.level();
        let prompt = session.game.prompt(level);
        let options = match (session.phase(), prompt) {
            (Phase::Question, Some(p)) => p.options.to_vec(),
            _ => Vec::new(),
        };

        let mut scene = Self {
            playfield: session.game.playfield(),
            primitives: Vec::new(),
            labels: Vec::new(),
            hud: Hud {
                title: G::TITLE,
                instructions: G::INSTRUCTIONS,
                phase: session.phase(),
                level,
                score: session.score(),
                lives: session.lives(),
                time_left: session.time_left(),
                won: session.won(),
                prompt: prompt.map(|p| p.text.to_string()),
                options,
            },
        };
        session.game.draw(&mut scene);
        scene
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, role: Role) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            role,
        });
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, role: Role) {
        self.primitives.push(Primitive::Rect { min, size, role });
    }

    pub fn label(&mut self, text: &str, center: Vec2, size: f32, dark: bool) {
        self.labels.push(Label {
            text: text.to_string(),
            center,
            size,
            dark,
        });
    }
}
