//! Pixel surfaces.
//!
//! The pipeline draws through the [`Surface`] trait so callers can supply
//! their own pixel storage. [`Image`] is the crate's own implementation and
//! doubles as the texture type.

mod bitmap;
pub(crate) mod scanline;

pub use bitmap::Image;

use crate::math::vec2::Vec2;
use crate::palette::Color;

/// A palette-indexed pixel surface the pipeline can draw into.
///
/// Coordinates are signed so callers never have to pre-clip: reads outside
/// the surface return [`crate::palette::TRANSPARENT`] and writes outside it
/// are ignored.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at `(x, y)`, or 0 when out of bounds.
    fn get_pixel(&self, x: i32, y: i32) -> Color;

    /// Writes `color` at `(x, y)`; out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Flat-fills the triangle `(p0, p1, p2)` with `color`.
    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color);
}
