//! Bounding shapes for placement and proximity queries
//!
//! Two axis-aligned shapes cover everything in the game: circles (miners,
//! asteroids) and rectangles (solar panels, toolbar buttons). The set is
//! closed, so every pairing is handled by one exhaustive match.
//!
//! Coordinates are screen-style: +y points down, so `top < bottom`.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which kind of shape a bound is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => f.write_str("circle"),
            ShapeKind::Rectangle => f.write_str("rectangle"),
        }
    }
}

/// A circle with a movable center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl BoundingCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching circles count as intersecting
    pub fn intersects_circle(&self, other: &BoundingCircle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Clamp the center onto the rectangle to find the nearest point, then
    /// compare against the radius (boundary inclusive).
    pub fn intersects_rect(&self, rect: &BoundingRect) -> bool {
        let nearest = Vec2::new(
            self.center.x.clamp(rect.left(), rect.right()),
            self.center.y.clamp(rect.top(), rect.bottom()),
        );
        self.center.distance_squared(nearest) <= self.radius * self.radius
    }
}

/// An axis-aligned rectangle with a movable center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// A square of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, size, size)
    }

    /// A rectangle from a center and a `(width, height)` size
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Separating-axis test on the four edges (shared edges intersect)
    pub fn intersects_rect(&self, other: &BoundingRect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.top() > other.bottom()
            || self.bottom() < other.top())
    }

    /// Point hit-test, edges inclusive. Used for pointer hover checks.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Any bound an entity can carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    Circle(BoundingCircle),
    Rectangle(BoundingRect),
}

impl Bounds {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Bounds::Circle(BoundingCircle::new(center, radius))
    }

    pub fn square(center: Vec2, size: f32) -> Self {
        Bounds::Rectangle(BoundingRect::square(center, size))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Bounds::Circle(_) => ShapeKind::Circle,
            Bounds::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Bounds::Circle(c) => c.center,
            Bounds::Rectangle(r) => r.center,
        }
    }

    pub fn set_center(&mut self, center: Vec2) {
        match self {
            Bounds::Circle(c) => c.center = center,
            Bounds::Rectangle(r) => r.center = center,
        }
    }

    /// Pairwise intersection test. Symmetric for every pairing.
    pub fn intersects(&self, other: &Bounds) -> bool {
        match (self, other) {
            (Bounds::Circle(a), Bounds::Circle(b)) => a.intersects_circle(b),
            (Bounds::Circle(c), Bounds::Rectangle(r)) | (Bounds::Rectangle(r), Bounds::Circle(c)) => {
                c.intersects_rect(r)
            }
            (Bounds::Rectangle(a), Bounds::Rectangle(b)) => a.intersects_rect(b),
        }
    }
}
