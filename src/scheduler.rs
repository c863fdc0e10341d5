//! Per-display-refresh frame driver
//!
//! Each frame feeds the elapsed time into a fixed-step accumulator, runs at
//! most [`MAX_SUBSTEPS`] simulation ticks, then paints a snapshot. Time only
//! accumulates while the session is live; paused and prompt frames still
//! paint but bank nothing, so resuming never replays the pause.
//!
//! Substeps are stamped with their own position on the frame clock, so a
//! delayed transition completes within one fixed step of its deadline. A
//! frame that hits the substep cap drops its backlog instead of carrying it.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Draw, RenderSurface, Scene};
use crate::sim::{Phase, Session, Variant, tick};

/// What the scheduler needs from a session
pub trait Simulation {
    /// One fixed step; returns true if it changed state
    fn step(&mut self, dt: f32, now_ms: f64) -> bool;
    /// Whether frame time should be accumulated this frame
    fn accumulates(&self) -> bool;
    fn is_torn_down(&self) -> bool;
    fn capture(&self) -> Scene;
}

impl<G: Variant + Draw> Simulation for Session<G> {
    fn step(&mut self, dt: f32, now_ms: f64) -> bool {
        tick(self, dt, now_ms)
    }

    fn accumulates(&self) -> bool {
        matches!(self.phase(), Phase::Playing | Phase::Transitioning)
    }

    fn is_torn_down(&self) -> bool {
        Session::is_torn_down(self)
    }

    fn capture(&self) -> Scene {
        Scene::capture(self)
    }
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Scheduler cancelled or session torn down; do not reschedule
    Cancelled,
    /// No surface to paint on; nothing happened
    NoSurface,
    Rendered { substeps: u32 },
    /// Simulation ran but painting failed; the next frame retries
    RenderFailed { substeps: u32 },
}

impl FrameOutcome {
    /// Whether the platform should request another frame
    pub fn reschedule(self) -> bool {
        !matches!(self, FrameOutcome::Cancelled)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    accumulator: f32,
    last_time: Option<f64>,
    cancelled: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one display-refresh frame at `now_ms` (frame clock, milliseconds)
    pub fn frame<S, R>(&mut self, sim: &mut S, surface: Option<&mut R>, now_ms: f64) -> FrameOutcome
    where
        S: Simulation + ?Sized,
        R: RenderSurface + ?Sized,
    {
        if self.cancelled || sim.is_torn_down() {
            return FrameOutcome::Cancelled;
        }
        let Some(surface) = surface else {
            return FrameOutcome::NoSurface;
        };

        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);

        let mut substeps = 0;
        if sim.accumulates() {
            self.accumulator += dt;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.accumulator -= SIM_DT;
                // Each substep sits at its own point on the frame clock
                let step_ms = now_ms - f64::from(self.accumulator) * 1000.0;
                sim.step(SIM_DT, step_ms);
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS && self.accumulator > SIM_DT {
                let dropped = (self.accumulator - SIM_DT) * 1000.0;
                log::debug!("Dropping {:.1}ms of simulation backlog", dropped);
                self.accumulator = SIM_DT;
            }
        } else {
            self.accumulator = 0.0;
        }
        self.frames += 1;

        let scene = sim.capture();
        match surface.present(&scene) {
            Ok(()) => FrameOutcome::Rendered { substeps },
            Err(e) => {
                log::warn!("Render error: {}", e);
                FrameOutcome::RenderFailed { substeps }
            }
        }
    }

    /// Stop scheduling; every later frame is a no-op
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            log::debug!("Frame scheduler cancelled after {} frames", self.frames);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Forget the previous frame time, e.g. after a reset
    pub fn rewind(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Unsimulated time carried into the next frame (seconds)
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}
