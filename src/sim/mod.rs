//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod distractor;
pub mod entity;
pub mod input;
mod session;
pub mod state;
pub mod tick;
pub mod timer;
pub mod variant;

#[cfg(test)]
pub(crate) mod probe;

pub use collision::{Collider, Contact, Shape, first_contact, first_touching, overlaps};
pub use distractor::numeric_distractors;
pub use entity::{Axes, Body, Bounds, EntityIds, Player, Projectile, Target};
pub use input::{InputController, Key};
pub use state::{GameEvent, PendingKind, PendingTransition, Phase, Session, TransitionLock, Tuning};
pub use tick::tick;
pub use timer::{Countdown, CountdownId, CountdownTick};
pub use variant::{Prompt, SpawnContext, StepInput, TimeoutOutcome, Trigger, Variant, WrongOutcome};
