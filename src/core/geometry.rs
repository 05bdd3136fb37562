//! Projection geometry - cursor offsets snapped onto aim directions
//!
//! Configurable particles aim along one of the 8 compass directions (or only the
//! 4 axis directions for radius sensors). The cursor offset from the anchor cell is
//! projected onto the closest allowed direction and then reduced to a single
//! non-negative distance.

/// Integer grid point (cell or device coordinates, which coincide 1:1)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Squared length, widened so far off-grid offsets cannot overflow
    pub fn length_squared(&self) -> i64 {
        let (x, y) = (self.x as i64, self.y as i64);
        (x * x).saturating_add(y * y)
    }

    /// Row-major ordering key: (y, x). Matches the top-to-bottom, left-to-right scan order.
    #[inline]
    pub fn row_major(&self) -> (i32, i32) {
        (self.y, self.x)
    }

    /// Per-axis sign, each component in {-1, 0, 1}
    pub fn signum(&self) -> Direction {
        Direction::new(self.x.signum(), self.y.signum())
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x.saturating_add(rhs.x), y: self.y.saturating_add(rhs.y) }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x.saturating_sub(rhs.x), y: self.y.saturating_sub(rhs.y) }
    }
}

/// Round a sub-cell float position to its cell, the same way the simulation does
#[inline]
pub fn cell_of(x: f32, y: f32) -> Point {
    Point::new((x + 0.5) as i32, (y + 0.5) as i32)
}

/// Unit step along one of the 8 directions (or zero when there is no direction yet)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Point `steps` cells away from `origin` along this direction
    #[inline]
    pub fn walk(&self, origin: Point, steps: i32) -> Point {
        Point::new(
            origin.x.saturating_add(self.dx.saturating_mul(steps)),
            origin.y.saturating_add(self.dy.saturating_mul(steps)),
        )
    }

    /// All 8 non-zero directions, row by row
    pub fn all() -> impl Iterator<Item = Direction> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| Direction::new(dx, dy)))
            .filter(|d| !d.is_none())
    }
}

/// Project `sample` onto the allowed directions around the cell of `anchor`.
///
/// The axis candidate keeps the larger component of the offset (ties keep Y).
/// The diagonal candidate lands on `\` when both components are positive or both
/// non-positive, on `/` otherwise. The diagonal is returned only when diagonals are
/// allowed and it leaves a strictly smaller squared residual.
pub fn project_point(anchor: Point, sample: Point, allow_diagonal: bool) -> Point {
    // Cursors may sit arbitrarily far off the grid; work in i64 and compare in i128
    let rx = sample.x as i64 - anchor.x as i64;
    let ry = sample.y as i64 - anchor.y as i64;

    let axis = if rx.abs() > ry.abs() { (rx, 0) } else { (0, ry) };

    if !allow_diagonal {
        return saturated(axis);
    }

    let diagonal = if (rx > 0) == (ry > 0) {
        let d = (rx + ry) / 2;
        (d, d)
    } else {
        let d = (rx - ry) / 2;
        (d, -d)
    };

    let axis_residual = residual((rx, ry), axis);
    let diagonal_residual = residual((rx, ry), diagonal);
    if diagonal_residual < axis_residual {
        saturated(diagonal)
    } else {
        saturated(axis)
    }
}

fn residual(rel: (i64, i64), candidate: (i64, i64)) -> i128 {
    let dx = (rel.0 - candidate.0) as i128;
    let dy = (rel.1 - candidate.1) as i128;
    dx * dx + dy * dy
}

fn saturated((x, y): (i64, i64)) -> Point {
    let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    Point::new(clamp(x), clamp(y))
}

/// Distance along a projected offset, measured past `inner_offset` and clamped at zero.
///
/// The offset is axis-aligned or diagonal, so one non-zero component carries the
/// whole distance (in cells, diagonals count steps, not euclidean length).
pub fn get_dist(offset: Point, inner_offset: i32) -> i32 {
    let signed = if offset.x != 0 { offset.x } else { offset.y };
    signed.saturating_abs().saturating_sub(inner_offset).max(0)
}
