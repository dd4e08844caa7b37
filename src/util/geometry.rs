//! Geometry primitives: points, boxes, and output transforms.

use std::fmt;

// ===== Point =====

/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ===== Rect =====

/// An axis-aligned box. Position may be negative, size may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Whether the point falls inside the box. Empty boxes contain nothing.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        px >= self.x as f64
            && px < self.right() as f64
            && py >= self.y as f64
            && py < self.bottom() as f64
    }

    /// Overlapping area of two boxes, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Rect::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32))
    }

    /// Smallest box covering both. Empty boxes are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rect::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32)
    }

    /// Nearest point on or inside the box to the given point, clamping to
    /// the inclusive far edge (`x + width`, `y + height`).
    ///
    /// A point already inside is returned unchanged. Empty boxes clamp to
    /// their origin.
    pub fn closest_point(&self, px: f64, py: f64) -> Point {
        if self.is_empty() {
            return Point::new(self.x as f64, self.y as f64);
        }
        let cx = px.clamp(self.x as f64, self.right() as f64);
        let cy = py.clamp(self.y as f64, self.bottom() as f64);
        Point::new(cx, cy)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

// ===== Transform =====

/// Output transform, matching the Wayland `wl_output.transform` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Transform {
    #[default]
    Normal = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
    Flipped = 4,
    FlippedRotate90 = 5,
    FlippedRotate180 = 6,
    FlippedRotate270 = 7,
}

impl Transform {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Transform::Normal),
            1 => Some(Transform::Rotate90),
            2 => Some(Transform::Rotate180),
            3 => Some(Transform::Rotate270),
            4 => Some(Transform::Flipped),
            5 => Some(Transform::FlippedRotate90),
            6 => Some(Transform::FlippedRotate180),
            7 => Some(Transform::FlippedRotate270),
            _ => None,
        }
    }

    pub fn to_u32(self) -> u32 {
        self as u32
    }

    pub fn is_flipped(self) -> bool {
        self.to_u32() & 4 != 0
    }

    /// The transform that undoes this one.
    ///
    /// Flipped transforms are their own inverse; plain 90 and 270
    /// rotations swap.
    pub fn invert(self) -> Self {
        let v = self.to_u32();
        if v & 4 != 0 {
            return self;
        }
        match self {
            Transform::Rotate90 => Transform::Rotate270,
            Transform::Rotate270 => Transform::Rotate90,
            other => other,
        }
    }

    /// Apply `other` after `self`.
    pub fn compose(self, other: Transform) -> Self {
        let a = self.to_u32();
        let b = other.to_u32();
        let flip = (a ^ b) & 4;
        let rotation = if b & 4 != 0 {
            (b.wrapping_sub(a)) & 3
        } else {
            (a + b) & 3
        };
        // Safe by construction: flip | rotation is always in 0..8.
        Transform::from_u32(flip | rotation).unwrap_or(Transform::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_point_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains_point(10.0, 10.0));
        assert!(r.contains_point(29.9, 29.9));
        assert!(!r.contains_point(30.0, 10.0));
        assert!(!r.contains_point(9.9, 15.0));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(!r.contains_point(0.0, 0.0));
    }

    #[test]
    fn intersection_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));

        let c = Rect::new(20, 20, 5, 5);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn closest_point_clamps_to_inclusive_edge() {
        let r = Rect::new(0, 0, 10, 10);
        assert_eq!(r.closest_point(5.0, 5.0), Point::new(5.0, 5.0));
        // Points beyond the box land on the edge, not one pixel inside.
        assert_eq!(r.closest_point(-3.0, 20.0), Point::new(0.0, 10.0));
        assert_eq!(r.closest_point(15.0, 5.0), Point::new(10.0, 5.0));
    }

    #[test]
    fn transform_roundtrip_and_invert() {
        for v in 0..8 {
            let t = Transform::from_u32(v).unwrap();
            assert_eq!(t.to_u32(), v);
            assert_eq!(t.compose(t.invert()), Transform::Normal);
        }
        assert_eq!(Transform::from_u32(8), None);
    }

    #[test]
    fn compose_rotations() {
        assert_eq!(
            Transform::Rotate90.compose(Transform::Rotate90),
            Transform::Rotate180
        );
        assert_eq!(
            Transform::Rotate270.compose(Transform::Rotate90),
            Transform::Normal
        );
    }
}
