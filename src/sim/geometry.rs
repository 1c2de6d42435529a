//! Axis-aligned rectangles and play-area bounds
//!
//! Every entity is a rectangle described by its center and size, in screen
//! coordinates (origin top-left, y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// The whole play area
    pub fn play_area() -> Self {
        let size = Vec2::new(PLAY_WIDTH, PLAY_HEIGHT);
        Self::new(size / 2.0, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Copy of this rectangle moved by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.center + delta, self.size)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Overlap test. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Bounding box of this rectangle after rotating it about its center
    pub fn rotated_bounds(&self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let size = Vec2::new(
            self.size.x * cos + self.size.y * sin,
            self.size.x * sin + self.size.y * cos,
        );
        Self::new(self.center, size)
    }
}

/// Containment test against the play area, per axis.
///
/// Returns `(horizontal, vertical)`; each is true iff the rectangle lies
/// fully within the play area on that axis.
pub fn in_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= PLAY_WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= PLAY_HEIGHT;
    (horizontal, vertical)
}

/// True iff the rectangle is inside the play area on both axes
#[inline]
pub fn fully_in_bounds(rect: &Rect) -> bool {
    in_bounds(rect) == (true, true)
}

/// Unit vector from `origin`'s center toward `target`'s center.
///
/// `None` when both share the same center.
pub fn direction_to(origin: &Rect, target: &Rect) -> Option<Vec2> {
    (target.center - origin.center).try_normalize()
}
