//! Axis-aligned rectangles
//!
//! Everything in the level collides as a box with its origin at the top-left
//! corner and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Shrink horizontally by `inset` on both sides
    pub fn inset_x(&self, inset: f32) -> Rect {
        Rect::new(self.x + inset, self.y, (self.w - 2.0 * inset).max(0.0), self.h)
    }

    /// Strip of `height` sitting directly on top of this rect
    pub fn top_strip(&self, height: f32) -> Rect {
        Rect::new(self.x, self.y - height, self.w, height)
    }
}
