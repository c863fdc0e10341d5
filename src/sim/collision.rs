//! Collision detection over the entity store
//!
//! Shapes are a tagged variant; each pairing is answered by a small table of
//! pairwise tests. Scans stop at the first overlapping pair so that at most
//! one collision is resolved per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned rectangle; a zero size makes it a point
    Rect { min: Vec2, size: Vec2 },
}

impl Shape {
    /// Axis-aligned bounding box as (min, max)
    pub fn aabb(&self) -> (Vec2, Vec2) {
        match *self {
            Shape::Circle { center, radius } => (center - radius, center + radius),
            Shape::Rect { min, size } => (min, min + size),
        }
    }

    #[inline]
    fn kind(&self) -> usize {
        match self {
            Shape::Circle { .. } => 0,
            Shape::Rect { .. } => 1,
        }
    }
}

/// Circles collide when the centre distance is at most the sum of radii
#[inline]
pub fn circles_touch(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    a_center.distance(b_center) <= a_radius + b_radius
}

/// Strict interval overlap on both axes; touching edges do not collide
#[inline]
pub fn rects_overlap(a_min: Vec2, a_size: Vec2, b_min: Vec2, b_size: Vec2) -> bool {
    a_min.x < b_min.x + b_size.x
        && a_min.x + a_size.x > b_min.x
        && a_min.y < b_min.y + b_size.y
        && a_min.y + a_size.y > b_min.y
}

type PairTest = fn(&Shape, &Shape) -> bool;

fn circle_circle(a: &Shape, b: &Shape) -> bool {
    match (*a, *b) {
        (
            Shape::Circle {
                center: ca,
                radius: ra,
            },
            Shape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circles_touch(ca, ra, cb, rb),
        _ => false,
    }
}

fn rect_rect(a: &Shape, b: &Shape) -> bool {
    match (*a, *b) {
        (Shape::Rect { min: ma, size: sa }, Shape::Rect { min: mb, size: sb }) => {
            rects_overlap(ma, sa, mb, sb)
        }
        _ => false,
    }
}

/// Mixed pairings compare the circle's bounding box against the rectangle
fn boxes(a: &Shape, b: &Shape) -> bool {
    let (a_min, a_max) = a.aabb();
    let (b_min, b_max) = b.aabb();
    rects_overlap(a_min, a_max - a_min, b_min, b_max - b_min)
}

/// Indexed by `[a.kind()][b.kind()]`
const PAIR_TESTS: [[PairTest; 2]; 2] = [[circle_circle, boxes], [boxes, rect_rect]];

/// Whether two shapes overlap
#[inline]
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    PAIR_TESTS[a.kind()][b.kind()](a, b)
}

/// Anything that can take part in a collision scan
pub trait Collider {
    fn shape(&self) -> Shape;

    /// Inactive colliders are skipped by scans
    fn is_active(&self) -> bool {
        true
    }
}

impl Collider for super::entity::Projectile {
    fn shape(&self) -> Shape {
        super::entity::Projectile::shape(self)
    }
}

impl Collider for super::entity::Target {
    fn shape(&self) -> Shape {
        super::entity::Target::shape(self)
    }

    fn is_active(&self) -> bool {
        !self.struck
    }
}

impl Collider for super::entity::Player {
    fn shape(&self) -> Shape {
        super::entity::Player::shape(self)
    }
}

/// A detected overlap between two collections, by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub first: usize,
    pub second: usize,
}

/// First overlapping pair, scanning `a` then `b` in creation order
pub fn first_contact<A: Collider, B: Collider>(a: &[A], b: &[B]) -> Option<Contact> {
    for (i, lhs) in a.iter().enumerate() {
        if !lhs.is_active() {
            continue;
        }
        let lhs_shape = lhs.shape();
        for (j, rhs) in b.iter().enumerate() {
            if rhs.is_active() && overlaps(&lhs_shape, &rhs.shape()) {
                return Some(Contact {
                    first: i,
                    second: j,
                });
            }
        }
    }
    None
}

/// First entity in `items` overlapping a single collider
pub fn first_touching<A: Collider, B: Collider>(items: &[A], other: &B) -> Option<usize> {
    let other_shape = other.shape();
    items
        .iter()
        .position(|item| item.is_active() && overlaps(&item.shape(), &other_shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Axes, Body, Projectile, Target};

    fn shot(id: u32, x: f32, y: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, -600.0),
            body: Body::Circle { radius: 6.0 },
        }
    }

    fn bubble(id: u32, x: f32, y: f32, label: &str) -> Target {
        Target {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            body: Body::Circle { radius: 28.0 },
            label: label.into(),
            correct: false,
            axes: Axes::BOTH,
            struck: false,
        }
    }

    #[test]
    fn test_circles_touching_at_radius_sum() {
        let a = Shape::Circle {
            center: Vec2::ZERO,
            radius: 6.0,
        };
        let b = Shape::Circle {
            center: Vec2::new(34.0, 0.0),
            radius: 28.0,
        };
        assert!(overlaps(&a, &b));

        let c = Shape::Circle {
            center: Vec2::new(34.5, 0.0),
            radius: 28.0,
        };
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_rect_edges_touching_do_not_collide() {
        let a = Shape::Rect {
            min: Vec2::ZERO,
            size: Vec2::new(10.0, 10.0),
        };
        let b = Shape::Rect {
            min: Vec2::new(10.0, 0.0),
            size: Vec2::new(10.0, 10.0),
        };
        assert!(!overlaps(&a, &b));

        let c = Shape::Rect {
            min: Vec2::new(9.5, 9.5),
            size: Vec2::new(10.0, 10.0),
        };
        assert!(overlaps(&a, &c));
    }

    #[test]
    fn test_point_strictly_inside_rect() {
        let player = Shape::Rect {
            min: Vec2::new(400.0, 300.0),
            size: Vec2::new(60.0, 60.0),
        };
        let inside = Shape::Rect {
            min: Vec2::new(430.0, 330.0),
            size: Vec2::ZERO,
        };
        let on_edge = Shape::Rect {
            min: Vec2::new(400.0, 330.0),
            size: Vec2::ZERO,
        };
        assert!(overlaps(&inside, &player));
        assert!(!overlaps(&on_edge, &player));
    }

    #[test]
    fn test_mixed_pairing_is_symmetric() {
        let circle = Shape::Circle {
            center: Vec2::new(15.0, 5.0),
            radius: 6.0,
        };
        let rect = Shape::Rect {
            min: Vec2::ZERO,
            size: Vec2::new(10.0, 10.0),
        };
        assert!(overlaps(&circle, &rect));
        assert!(overlaps(&rect, &circle));
    }

    #[test]
    fn test_first_contact_is_creation_ordered() {
        let shots = vec![shot(1, 500.0, 500.0), shot(2, 100.0, 100.0), shot(3, 300.0, 100.0)];
        let bubbles = vec![
            bubble(10, 300.0, 110.0, "21"),
            bubble(11, 100.0, 110.0, "19"),
        ];

        let contact = first_contact(&shots, &bubbles).unwrap();
        assert_eq!(contact, Contact { first: 1, second: 1 });

        // Repeated scans give the same answer
        assert_eq!(first_contact(&shots, &bubbles), Some(contact));
    }

    #[test]
    fn test_struck_targets_are_skipped() {
        let shots = vec![shot(1, 100.0, 100.0)];
        let mut bubbles = vec![bubble(10, 100.0, 110.0, "19")];
        bubbles[0].struck = true;
        assert_eq!(first_contact(&shots, &bubbles), None);
    }
}
