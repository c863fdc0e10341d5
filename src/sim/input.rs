//! Input controller: held-key state plus a rate-limited fire action
//!
//! The session decides whether input is accepted at all (only while playing
//! and unlocked); this module only tracks what is held and whether a shot
//! is waiting to be spawned on the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical game keys, independent of the physical binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
}

/// Held movement keys and pending fire request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputController {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    /// A shot passed the cooldown and awaits the next tick
    fire_queued: bool,
    /// Timestamp of the last accepted shot (ms)
    last_fire_ms: Option<f64>,
    /// Minimum interval between shots (ms)
    cooldown_ms: f64,
}

impl InputController {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            left: false,
            right: false,
            up: false,
            down: false,
            fire_queued: false,
            last_fire_ms: None,
            cooldown_ms,
        }
    }

    /// Register a key press. Returns true if a shot was queued.
    ///
    /// Fire is edge-triggered: each press is one request, accepted only if
    /// strictly more than the cooldown has passed since the last one.
    pub fn press(&mut self, key: Key, now_ms: f64) -> bool {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Fire => {
                let ready = self
                    .last_fire_ms
                    .map(|last| now_ms - last > self.cooldown_ms)
                    .unwrap_or(true);
                if ready {
                    self.fire_queued = true;
                    self.last_fire_ms = Some(now_ms);
                    return true;
                }
            }
            Key::Pause => {}
        }
        false
    }

    /// Releases are always honoured so keys never stick
    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Fire | Key::Pause => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Fire | Key::Pause => false,
        }
    }

    /// Held direction; opposite keys cancel. Screen space, +y is down.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    /// Consume the pending fire request
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire_queued)
    }

    /// Forget the last accepted shot so the next press is never throttled
    pub fn rearm(&mut self) {
        self.fire_queued = false;
        self.last_fire_ms = None;
    }

    /// Drop all held keys and any pending shot
    pub fn clear(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.fire_queued = false;
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(crate::consts::FIRE_COOLDOWN_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_cooldown() {
        let mut input = InputController::new(200.0);
        assert!(input.press(Key::Fire, 1000.0));
        assert!(input.take_fire());
        assert!(!input.take_fire());

        // Within cooldown (and exactly at it) is rejected
        assert!(!input.press(Key::Fire, 1100.0));
        assert!(!input.press(Key::Fire, 1200.0));
        assert!(!input.take_fire());

        assert!(input.press(Key::Fire, 1200.5));
        assert!(input.take_fire());
    }

    #[test]
    fn test_direction_from_held_keys() {
        let mut input = InputController::default();
        assert_eq!(input.direction(), Vec2::ZERO);

        input.press(Key::Left, 0.0);
        assert_eq!(input.direction(), Vec2::new(-1.0, 0.0));

        input.press(Key::Right, 0.0);
        assert_eq!(input.direction(), Vec2::ZERO);

        input.release(Key::Left);
        input.press(Key::Down, 0.0);
        assert_eq!(input.direction(), Vec2::new(1.0, 1.0));
        assert!(input.is_held(Key::Down));
    }

    #[test]
    fn test_clear_drops_held_and_queued() {
        let mut input = InputController::default();
        input.press(Key::Up, 0.0);
        input.press(Key::Fire, 0.0);
        input.clear();
        assert_eq!(input.direction(), Vec2::ZERO);
        assert!(!input.take_fire());
    }

    #[test]
    fn test_rearm_resets_cooldown() {
        let mut input = InputController::new(200.0);
        assert!(input.press(Key::Fire, 1000.0));
        input.rearm();
        assert!(!input.take_fire());
        assert!(input.press(Key::Fire, 1050.0));
        assert!(input.take_fire());
    }
}
