//! One-cell translations of a feature map with zero fill.
//!
//! A direction names where the content moves. The `Up` copy therefore reads
//! the row below (`shifted[y][x] = feat[y + 1][x]`) and its last row is
//! zero; diagonals move both axes at once. All eight cases go through the
//! same `(dy, dx)` sampling offset.
use crate::tensor::FeatureMap;

/// The eight neighbour directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Fixed accumulation order.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Sampling offset `(dy, dx)`: `shifted[y][x] = feat[y + dy][x + dx]`.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
            Direction::UpLeft => (1, 1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (-1, -1),
        }
    }
}

/// Shifted copy of `feat`; reads outside the plane yield `0.0`.
pub fn shift(feat: &FeatureMap, direction: Direction) -> FeatureMap {
    let shape = feat.shape();
    let mut out = FeatureMap::zeros(shape);
    for n in 0..shape.n {
        for c in 0..shape.c {
            shift_plane_into(feat, n, c, direction, out.plane_mut(n, c));
        }
    }
    out
}

/// Write the shifted `(n, c)` plane of `feat` into `dst` (length `h * w`).
///
/// Only the in-range window is copied, row slice by row slice; `dst` must
/// already hold zeros everywhere else.
pub(crate) fn shift_plane_into(
    feat: &FeatureMap,
    n: usize,
    c: usize,
    direction: Direction,
    dst: &mut [f32],
) {
    let src = feat.plane(n, c);
    let (h, w) = (src.height(), src.width());
    let (dy, dx) = direction.offset();
    let dy_abs = dy.unsigned_abs();
    let dx_abs = dx.unsigned_abs();
    if dy_abs >= h || dx_abs >= w {
        return;
    }
    let rows = h - dy_abs;
    let cols = w - dx_abs;
    // Destination window starts where the source index would be negative.
    let (dst_y0, src_y0) = if dy >= 0 { (0, dy_abs) } else { (dy_abs, 0) };
    let (dst_x0, src_x0) = if dx >= 0 { (0, dx_abs) } else { (dx_abs, 0) };
    for r in 0..rows {
        let src_row = src.row(src_y0 + r);
        let start = (dst_y0 + r) * w + dst_x0;
        dst[start..start + cols].copy_from_slice(&src_row[src_x0..src_x0 + cols]);
    }
}
