//! Rendering module
//!
//! The render step is read-only: a [`Scene`] is captured from the session
//! and handed to a [`RenderSurface`]. The WebGPU surface tessellates it into
//! vertex-coloured triangles; text labels are left to the platform layer.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Draw, Hud, Label, Primitive, Role, Scene};
pub use vertex::{Palette, Vertex};

use crate::error::RenderError;

/// Something a frame can be painted onto
pub trait RenderSurface {
    fn present(&mut self, scene: &Scene) -> Result<(), RenderError>;
}

/// Surface that paints nothing; used by headless runs
#[derive(Debug, Default)]
pub struct NullSurface {
    /// Frames presented so far
    pub frames: u64,
    /// The last scene presented
    pub last: Option<Scene>,
}

impl RenderSurface for NullSurface {
    fn present(&mut self, scene: &Scene) -> Result<(), RenderError> {
        self.frames += 1;
        self.last = Some(scene.clone());
        Ok(())
    }
}
