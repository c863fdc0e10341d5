//! Vertex types and colours for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::scene::Role;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const CYAN: [f32; 4] = [0.0, 0.9, 1.0, 1.0];
    pub const GOLD: [f32; 4] = [0.95, 0.77, 0.06, 1.0];
    pub const DARK: [f32; 4] = [0.13, 0.13, 0.13, 1.0];
    pub const ORANGE_RED: [f32; 4] = [1.0, 0.24, 0.0, 1.0];
    pub const CREAM: [f32; 4] = [1.0, 1.0, 0.87, 1.0];
    pub const BLUE: [f32; 4] = [0.17, 0.48, 0.85, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 0.92, 0.23, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// HSL to RGBA, `h` in degrees, `s` and `l` in `[0, 1]`
pub fn hsl(h: f32, s: f32, l: f32) -> [f32; 4] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

/// Role-to-colour mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub player: [f32; 4],
    pub barrel: [f32; 4],
    pub projectile: [f32; 4],
    pub bubble: [f32; 4],
    pub tile: [f32; 4],
    /// Fixed hazard colour; `None` keeps the per-hazard hue
    pub hazard: Option<[f32; 4]>,
}

impl Palette {
    pub fn standard() -> Self {
        Self {
            background: colors::BACKGROUND,
            player: colors::CYAN,
            barrel: colors::DARK,
            projectile: colors::ORANGE_RED,
            bubble: colors::BLUE,
            tile: colors::YELLOW,
            hazard: None,
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            background: colors::BLACK,
            player: colors::WHITE,
            barrel: colors::WHITE,
            projectile: colors::YELLOW,
            bubble: colors::CYAN,
            tile: colors::YELLOW,
            hazard: Some([1.0, 0.0, 0.0, 1.0]),
        }
    }

    pub fn from_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::standard()
        }
    }

    pub fn color(&self, role: Role) -> [f32; 4] {
        match role {
            Role::Player => self.player,
            Role::Barrel => self.barrel,
            Role::Projectile => self.projectile,
            Role::Bubble => self.bubble,
            Role::Tile => self.tile,
            Role::Hazard { hue } => self.hazard.unwrap_or_else(|| hsl(hue as f32, 0.8, 0.5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsl(360.0, 1.0, 0.5), hsl(0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_high_contrast_flattens_hazards() {
        let p = Palette::high_contrast();
        assert_eq!(p.color(Role::Hazard { hue: 30 }), p.color(Role::Hazard { hue: 200 }));
        let s = Palette::standard();
        assert_ne!(s.color(Role::Hazard { hue: 30 }), s.color(Role::Hazard { hue: 200 }));
    }
}
