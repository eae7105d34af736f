// SPDX-License-Identifier: MPL-2.0
//! Plain display-space geometry.
//!
//! All values are in CSS-like display pixels. Rectangles are relative to the
//! top-left corner of the displayed image.

/// A 2D offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Width and height of a displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn center(self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Vector {
        Vector::new(self.left, self.top)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the rectangle lies inside `0..bounds` on both axes.
    #[must_use]
    pub fn fits_within(&self, bounds: Size) -> bool {
        const TOLERANCE: f32 = 1e-3;
        self.left >= -TOLERANCE
            && self.top >= -TOLERANCE
            && self.right() <= bounds.width + TOLERANCE
            && self.bottom() <= bounds.height + TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_nan_size_is_degenerate() {
        assert!(Size::new(0.0, 100.0).is_degenerate());
        assert!(Size::new(100.0, 0.0).is_degenerate());
        assert!(Size::new(f32::NAN, 100.0).is_degenerate());
        assert!(!Size::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert!(rect.fits_within(Size::new(40.0, 60.0)));
        assert!(!rect.fits_within(Size::new(39.0, 60.0)));
    }

    #[test]
    fn vector_arithmetic() {
        let delta = Vector::new(5.0, 7.0) - Vector::new(2.0, 3.0);
        assert_eq!(delta, Vector::new(3.0, 4.0));
        assert_eq!(delta + Vector::ZERO, delta);
    }
}
