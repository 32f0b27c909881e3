//! Flat scanline triangle fill.
//!
//! Triangles are split into a flat-bottom and a flat-top half at the middle
//! vertex, then filled one horizontal span at a time:
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//! ```
//!
//! A pixel is covered when its center `(x + 0.5, y + 0.5)` lies inside the
//! triangle. Centers exactly on an edge are covered by both neighbours, so
//! two triangles sharing an edge (the two halves of a quad) leave no gap.

use crate::math::vec2::Vec2;
use crate::palette::Color;

/// Destination for span fills.
pub(crate) trait SpanTarget {
    /// Number of rows; spans are only generated for `0..rows()`.
    fn rows(&self) -> i32;

    /// Fills pixels `x_start..=x_end` on row `y`, clipping to the target.
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color);
}

/// Sorts three vertices by Y coordinate (ascending: top to bottom).
fn sort_vertices(v0: &mut Vec2, v1: &mut Vec2, v2: &mut Vec2) {
    if v1.y < v0.y {
        std::mem::swap(v0, v1);
    }
    if v2.y < v1.y {
        std::mem::swap(v1, v2);
    }
    if v1.y < v0.y {
        std::mem::swap(v0, v1);
    }
}

/// First and last scanline whose pixel center lies in `[top, bottom]`,
/// limited to `0..rows`.
#[inline]
fn row_range(top: f32, bottom: f32, rows: i32) -> (i32, i32) {
    (
        ((top - 0.5).ceil() as i32).max(0),
        ((bottom - 0.5).floor() as i32).min(rows - 1),
    )
}

#[inline]
fn span(x1: f32, x2: f32) -> (i32, i32) {
    (
        (x1.min(x2) - 0.5).ceil() as i32,
        (x1.max(x2) - 0.5).floor() as i32,
    )
}

/// `v1` and `v2` share the bottom Y.
fn fill_flat_bottom<T: SpanTarget>(v0: Vec2, v1: Vec2, v2: Vec2, target: &mut T, color: Color) {
    let height = v1.y - v0.y;
    if height.abs() < f32::EPSILON {
        return;
    }

    let inv_slope_1 = (v1.x - v0.x) / height;
    let inv_slope_2 = (v2.x - v0.x) / height;

    let (y_start, y_end) = row_range(v0.y, v1.y, target.rows());
    for y in y_start..=y_end {
        let dy = y as f32 + 0.5 - v0.y;
        let (x_left, x_right) = span(v0.x + inv_slope_1 * dy, v0.x + inv_slope_2 * dy);
        target.fill_span(y, x_left, x_right, color);
    }
}

/// `v0` and `v1` share the top Y.
fn fill_flat_top<T: SpanTarget>(v0: Vec2, v1: Vec2, v2: Vec2, target: &mut T, color: Color) {
    let height = v2.y - v0.y;
    if height.abs() < f32::EPSILON {
        return;
    }

    let inv_slope_1 = (v2.x - v0.x) / height;
    let inv_slope_2 = (v2.x - v1.x) / height;

    let (y_start, y_end) = row_range(v0.y, v2.y, target.rows());
    for y in y_start..=y_end {
        let dy = y as f32 + 0.5 - v0.y;
        let (x_left, x_right) = span(v0.x + inv_slope_1 * dy, v1.x + inv_slope_2 * dy);
        target.fill_span(y, x_left, x_right, color);
    }
}

/// Fills a triangle with a solid color. Vertex order does not matter.
pub(crate) fn fill_triangle<T: SpanTarget>(
    mut v0: Vec2,
    mut v1: Vec2,
    mut v2: Vec2,
    target: &mut T,
    color: Color,
) {
    if !(v0.x.is_finite()
        && v0.y.is_finite()
        && v1.x.is_finite()
        && v1.y.is_finite()
        && v2.x.is_finite()
        && v2.y.is_finite())
    {
        return;
    }

    sort_vertices(&mut v0, &mut v1, &mut v2);

    if (v1.y - v2.y).abs() < f32::EPSILON {
        fill_flat_bottom(v0, v1, v2, target, color);
        return;
    }

    if (v0.y - v1.y).abs() < f32::EPSILON {
        fill_flat_top(v0, v1, v2, target, color);
        return;
    }

    // Split point lies on edge v0->v2 at the same Y as v1
    let t = (v1.y - v0.y) / (v2.y - v0.y);
    let split = Vec2::new(v0.x + (v2.x - v0.x) * t, v1.y);

    fill_flat_bottom(v0, v1, split, target, color);
    fill_flat_top(v1, split, v2, target, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid {
        width: i32,
        height: i32,
        cells: Vec<Color>,
        spans: usize,
    }

    impl Grid {
        fn new(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                cells: vec![0; (width * height) as usize],
                spans: 0,
            }
        }

        fn count(&self, color: Color) -> usize {
            self.cells.iter().filter(|&&c| c == color).count()
        }
    }

    impl SpanTarget for Grid {
        fn rows(&self) -> i32 {
            self.height
        }

        fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
            self.spans += 1;
            if y < 0 || y >= self.height {
                return;
            }
            for x in x_start.max(0)..=x_end.min(self.width - 1) {
                self.cells[(y * self.width + x) as usize] = color;
            }
        }
    }

    #[test]
    fn right_triangle_covers_half_the_square() {
        let mut grid = Grid::new(10, 10);
        fill_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            &mut grid,
            3,
        );
        // 10 + 9 + ... + 1 pixel centers, diagonal centers included
        assert_eq!(grid.count(3), 55);
    }

    #[test]
    fn two_halves_of_a_square_leave_no_gap() {
        let mut grid = Grid::new(8, 8);
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(8.0, 0.0);
        let c = Vec2::new(0.0, 8.0);
        let d = Vec2::new(8.0, 8.0);
        fill_triangle(a, b, c, &mut grid, 1);
        fill_triangle(d, b, c, &mut grid, 2);
        assert_eq!(grid.count(0), 0);
    }

    #[test]
    fn degenerate_and_non_finite_triangles_draw_nothing() {
        let mut grid = Grid::new(8, 8);
        let p = Vec2::new(2.0, 2.0);
        fill_triangle(p, p, p, &mut grid, 5);
        fill_triangle(
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
            &mut grid,
            5,
        );
        assert_eq!(grid.count(5), 0);
    }

    #[test]
    fn far_vertices_only_generate_rows_on_the_target() {
        let mut grid = Grid::new(8, 8);
        fill_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, 1e12),
            &mut grid,
            4,
        );
        fill_triangle(
            Vec2::new(2.0, -1e12),
            Vec2::new(0.0, 4.0),
            Vec2::new(6.0, 4.0),
            &mut grid,
            6,
        );

        assert!(grid.spans <= 16, "{} spans", grid.spans);
        assert_eq!(grid.cells[(5 * 8 + 1) as usize], 4);
        assert_eq!(grid.cells[(3 * 8 + 1) as usize], 6);
    }
}
