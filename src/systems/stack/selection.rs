//! Selection rasterizer - stroke shape -> covered particle handles
//!
//! All three shapes scan the full active particle range and return handles in
//! ascending order, which is what stack processing expects.

use crate::brush::Brush;
use crate::core::Point;
use crate::particles::{Particle, ParticleHandle};
use crate::world::select_handles;

/// Live particles whose cell falls inside the brush mask centered on `center`
pub fn select_in_brush(particles: &[Particle], brush: &Brush, center: Point) -> Vec<ParticleHandle> {
    select_handles(particles, |p| brush.covers(p.cell() - center))
}

/// Live particles whose cell lies on the rasterized segment `p1..p2`
pub fn select_on_line(
    particles: &[Particle],
    brush: &Brush,
    p1: Point,
    p2: Point,
) -> Vec<ParticleHandle> {
    let radius = brush.radius();
    let cells = line_cells(p1, p2, radius.x + radius.y == 0);
    select_handles(particles, |p| {
        let key = p.cell().row_major();
        cells.binary_search_by_key(&key, |c| c.row_major()).is_ok()
    })
}

/// Live particles inside the normalized box spanned by `p1` and `p2` (inclusive).
/// Also returns the box's top-left corner.
pub fn select_in_rect(particles: &[Particle], p1: Point, p2: Point) -> (Vec<ParticleHandle>, Point) {
    let (x1, x2) = (p1.x.min(p2.x), p1.x.max(p2.x));
    let (y1, y2) = (p1.y.min(p2.y), p1.y.max(p2.y));
    let handles = select_handles(particles, |p| {
        let c = p.cell();
        c.x >= x1 && c.x <= x2 && c.y >= y1 && c.y <= y2
    });
    (handles, Point::new(x1, y1))
}

/// Cells of the segment `p1..p2`, sorted row-major (y, then x).
///
/// Walks the longer axis one cell at a time and steps the shorter axis once the
/// accumulated error reaches one half. With `fill_corners` set (zero-radius brushes)
/// the cell reached by each minor-axis step is emitted too, so the line has no
/// diagonal gaps.
pub fn line_cells(p1: Point, p2: Point, fill_corners: bool) -> Vec<Point> {
    let (mut x1, mut y1, mut x2, mut y2) = (p1.x, p1.y, p2.x, p2.y);
    let reverse_xy = (y2 - y1).abs() > (x2 - x1).abs();
    if reverse_xy {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let dx = x2 - x1;
    let dy = (y2 - y1).abs();
    let de = if dx != 0 { dy as f32 / dx as f32 } else { 0.0 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let emit = |major: i32, minor: i32| {
        if reverse_xy {
            Point::new(minor, major)
        } else {
            Point::new(major, minor)
        }
    };

    let mut cells = Vec::with_capacity((dx + dy + 1) as usize);
    let mut e = 0.0f32;
    let mut y = y1;
    for x in x1..=x2 {
        cells.push(emit(x, y));
        e += de;
        if e >= 0.5 {
            y += sy;
            let within = if y1 < y2 { y <= y2 } else { y >= y2 };
            if fill_corners && within {
                cells.push(emit(x, y));
            }
            e -= 1.0;
        }
    }

    cells.sort_by_key(|c| c.row_major());
    cells
}
