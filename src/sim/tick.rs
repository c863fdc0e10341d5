//! Fixed timestep simulation tick
//!
//! One tick samples input, integrates motion and runs the collision scan.
//! The countdown is not advanced here; it has its own clock.

use super::state::{GameEvent, Phase, Session};
use super::variant::{StepInput, Variant};

/// Advance a session by one fixed timestep.
///
/// Returns true if a transition (level change, retry, game over or
/// question prompt) happened during the tick.
pub fn tick<G: Variant>(session: &mut Session<G>, dt: f32, now_ms: f64) -> bool {
    if session.torn_down {
        return false;
    }

    // Delayed spawns finish on the frame clock
    if session.phase == Phase::Transitioning {
        return session.complete_pending(now_ms);
    }

    if session.phase != Phase::Playing || session.lock.is_held() {
        return false;
    }

    let input = StepInput {
        direction: session.input.direction(),
        fire: session.input.take_fire(),
    };
    if input.fire && session.game.fire() {
        session.events.push(GameEvent::Fired);
    }

    session.game.integrate(&input, dt, &mut session.rng);
    session.time_ticks += 1;

    match session.game.collide() {
        Some(trigger) => session.resolve(trigger, now_ms),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::input::Key;
    use crate::sim::probe::Probe;
    use crate::sim::state::Tuning;
    use crate::sim::variant::Trigger;
    use glam::Vec2;

    fn started() -> Session<Probe> {
        let mut s = Session::with_tuning(Probe::default(), Tuning::default(), 12345);
        s.start();
        s
    }

    #[test]
    fn test_tick_in_menu_does_nothing() {
        let mut s = Session::with_tuning(Probe::default(), Tuning::default(), 1);
        assert!(!tick(&mut s, SIM_DT, 0.0));
        assert_eq!(s.time_ticks(), 0);
        assert!(s.game.moves.is_empty());
    }

    #[test]
    fn test_tick_samples_held_direction() {
        let mut s = started();
        s.key_down(Key::Left, 0.0);
        s.key_down(Key::Down, 0.0);
        tick(&mut s, SIM_DT, 0.0);
        assert_eq!(s.game.moves, vec![Vec2::new(-1.0, 1.0)]);

        s.key_up(Key::Left);
        tick(&mut s, SIM_DT, 8.0);
        assert_eq!(s.game.moves[1], Vec2::new(0.0, 1.0));
        assert_eq!(s.time_ticks(), 2);
    }

    #[test]
    fn test_fire_consumed_once() {
        let mut s = started();
        s.key_down(Key::Fire, 0.0);
        tick(&mut s, SIM_DT, 0.0);
        tick(&mut s, SIM_DT, 8.0);
        assert_eq!(s.game.shots, 1);
        assert!(s.drain_events().contains(&GameEvent::Fired));
    }

    #[test]
    fn test_collision_resolves_through_session() {
        let mut s = started();
        s.game.next = Some(Trigger::Hit { correct: true });
        assert!(tick(&mut s, SIM_DT, 100.0));
        assert_eq!(s.phase(), Phase::Transitioning);

        // Locked: no integration, no further collisions
        let ticks = s.time_ticks();
        s.game.next = Some(Trigger::Hit { correct: false });
        assert!(!tick(&mut s, SIM_DT, 200.0));
        assert_eq!(s.time_ticks(), ticks);
        assert_eq!(s.lives(), Some(2));

        assert!(tick(&mut s, SIM_DT, 700.0));
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.level(), 2);
    }

    #[test]
    fn test_paused_session_is_frozen() {
        let mut s = started();
        s.key_down(Key::Pause, 0.0);
        for i in 0..10 {
            assert!(!tick(&mut s, SIM_DT, i as f64));
        }
        assert_eq!(s.time_ticks(), 0);
    }

    #[test]
    fn test_torn_down_session_ignores_ticks() {
        let mut s = started();
        s.game.next = Some(Trigger::Hit { correct: true });
        s.teardown();
        assert!(!tick(&mut s, SIM_DT, 0.0));
        assert_eq!(s.score(), 0);
    }
}
