//! Collision shapes
//!
//! Arena space is screen-like: origin at the top-left, +y points down.
//! Rectangles are axis-aligned and anchored at their minimum corner.
//! Touching boundaries count as an intersection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { origin: Vec2, width: f32, height: f32 },
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    pub fn rect(origin: Vec2, width: f32, height: f32) -> Self {
        Shape::Rect {
            origin,
            width,
            height,
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match *self {
            Shape::Circle { center, radius } => (center - radius, center + radius),
            Shape::Rect {
                origin,
                width,
                height,
            } => (origin, origin + Vec2::new(width, height)),
        }
    }

    pub fn intersects(&self, other: &Shape) -> bool {
        match (*self, *other) {
            (
                Shape::Circle {
                    center: a,
                    radius: ra,
                },
                Shape::Circle {
                    center: b,
                    radius: rb,
                },
            ) => a.distance_squared(b) <= (ra + rb) * (ra + rb),
            (Shape::Circle { center, radius }, rect @ Shape::Rect { .. })
            | (rect @ Shape::Rect { .. }, Shape::Circle { center, radius }) => {
                let (min, max) = rect.bounds();
                let closest = center.clamp(min, max);
                center.distance_squared(closest) <= radius * radius
            }
            (a @ Shape::Rect { .. }, b @ Shape::Rect { .. }) => {
                let (a_min, a_max) = a.bounds();
                let (b_min, b_max) = b.bounds();
                a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
            }
        }
    }
}

/// Free-function form of [`Shape::intersects`]
#[inline]
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    a.intersects(b)
}
