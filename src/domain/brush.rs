//! Brush - covered-cell mask around a brush center
//!
//! The mask is `size.x * size.y` cells, row-major, with the center at `radius`.

use serde::{Deserialize, Serialize};

use crate::core::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushShape {
    #[default]
    Circle,
    Square,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brush {
    shape: BrushShape,
    radius: Point,
    size: Point,
    bitmap: Vec<bool>,
}

/// Largest radius a brush can be built with, on either axis
pub const MAX_BRUSH_RADIUS: i32 = 1024;

impl Brush {
    pub fn new(shape: BrushShape, radius_x: i32, radius_y: i32) -> Self {
        let mut brush = Self {
            shape,
            radius: Point::zero(),
            size: Point::new(1, 1),
            bitmap: vec![true],
        };
        brush.set_radius(Point::new(radius_x, radius_y));
        brush
    }

    pub fn circle(radius: i32) -> Self {
        Self::new(BrushShape::Circle, radius, radius)
    }

    pub fn square(radius: i32) -> Self {
        Self::new(BrushShape::Square, radius, radius)
    }

    /// Single-cell brush used for point-precision operations
    pub fn point() -> Self {
        Self::new(BrushShape::Square, 0, 0)
    }

    pub fn shape(&self) -> BrushShape {
        self.shape
    }

    pub fn radius(&self) -> Point {
        self.radius
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn bitmap(&self) -> &[bool] {
        &self.bitmap
    }

    /// Resize the brush and rebuild its mask. Radii clamp to `0..=MAX_BRUSH_RADIUS`.
    pub fn set_radius(&mut self, radius: Point) {
        let radius = Point::new(
            radius.x.clamp(0, MAX_BRUSH_RADIUS),
            radius.y.clamp(0, MAX_BRUSH_RADIUS),
        );
        self.radius = radius;
        self.size = Point::new(radius.x * 2 + 1, radius.y * 2 + 1);
        self.bitmap = build_bitmap(self.shape, radius, self.size);
    }

    /// Copy of this brush with the radius forced to zero
    pub fn with_zero_radius(&self) -> Self {
        let mut brush = self.clone();
        brush.set_radius(Point::zero());
        brush
    }

    /// Whether the cell at `offset` from the brush center is covered
    pub fn covers(&self, offset: Point) -> bool {
        let bx = offset.x.saturating_add(self.radius.x);
        let by = offset.y.saturating_add(self.radius.y);
        if bx < 0 || bx >= self.size.x || by < 0 || by >= self.size.y {
            return false;
        }
        self.bitmap[(by * self.size.x + bx) as usize]
    }
}

fn build_bitmap(shape: BrushShape, radius: Point, size: Point) -> Vec<bool> {
    let mut bitmap = vec![false; (size.x * size.y) as usize];
    let rx2 = (radius.x as i64) * (radius.x as i64);
    let ry2 = (radius.y as i64) * (radius.y as i64);

    for y in 0..size.y {
        for x in 0..size.x {
            let covered = match shape {
                BrushShape::Square => true,
                BrushShape::Circle => {
                    let dx = (x - radius.x) as i64;
                    let dy = (y - radius.y) as i64;
                    dx * dx * ry2 + dy * dy * rx2 <= rx2 * ry2
                }
            };
            bitmap[(y * size.x + x) as usize] = covered;
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_brush_covers_only_center() {
        let brush = Brush::point();
        assert_eq!(brush.size(), Point::new(1, 1));
        assert!(brush.covers(Point::zero()));
        assert!(!brush.covers(Point::new(1, 0)));
    }

    #[test]
    fn circle_excludes_corners() {
        let brush = Brush::circle(2);
        assert!(brush.covers(Point::new(0, 2)));
        assert!(brush.covers(Point::new(-2, 0)));
        assert!(!brush.covers(Point::new(2, 2)));
        assert!(!brush.covers(Point::new(3, 0)));
    }

    #[test]
    fn square_covers_corners() {
        let brush = Brush::square(2);
        assert!(brush.covers(Point::new(2, 2)));
        assert!(brush.covers(Point::new(-2, -2)));
        assert_eq!(brush.bitmap().iter().filter(|c| **c).count(), 25);
    }

    #[test]
    fn oversized_radius_is_clamped() {
        let brush = Brush::new(BrushShape::Square, i32::MAX, -3);
        assert_eq!(brush.radius(), Point::new(MAX_BRUSH_RADIUS, 0));
        assert_eq!(brush.size(), Point::new(MAX_BRUSH_RADIUS * 2 + 1, 1));
        assert!(brush.covers(Point::new(-MAX_BRUSH_RADIUS, 0)));
        assert!(!brush.covers(Point::new(i32::MAX, 0)));
    }

    #[test]
    fn zero_radius_copy_keeps_shape() {
        let brush = Brush::circle(5).with_zero_radius();
        assert_eq!(brush.shape(), BrushShape::Circle);
        assert_eq!(brush.radius(), Point::zero());
        assert!(brush.covers(Point::zero()));
    }
}
