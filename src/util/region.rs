//! Hit-test regions built from rectangle unions.
//!
//! This is a small binding-side model, not a pixman wrapper: a region is
//! a list of boxes, and containment means "inside any of them". Good
//! enough for input regions and damage bookkeeping on the binding side.

use super::geometry::Rect;

/// A set of points described as a union of rectangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }

    /// Add a rectangle to the union. Empty rectangles are dropped.
    pub fn add(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.rects.iter().any(|r| r.contains_point(x, y))
    }

    /// Bounding box of the region, or `None` when empty.
    pub fn extents(&self) -> Option<Rect> {
        let mut iter = self.rects.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(r)))
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        for rect in &mut self.rects {
            rect.x += dx;
            rect.y += dy;
        }
    }

    /// The part of the region that overlaps `clip`.
    pub fn intersect_rect(&self, clip: &Rect) -> Region {
        let mut out = Region::new();
        for rect in &self.rects {
            if let Some(hit) = rect.intersection(clip) {
                out.add(hit);
            }
        }
        out
    }
}
