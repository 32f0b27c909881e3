//! Flat-fill of visible faces.

use super::transform::TransformedVertex;
use crate::mesh::Face;
use crate::render::Surface;

/// Fills `face` on `surface` with its flat color.
///
/// Quads are always split along the 1-2 diagonal into `(0, 1, 2)` and
/// `(3, 1, 2)`, regardless of which diagonal is shorter.
pub fn rasterize_face<S: Surface + ?Sized>(
    face: &Face,
    vertices: &[TransformedVertex],
    surface: &mut S,
) {
    let p = |i: usize| vertices[i].screen;
    match face {
        Face::Triangle { indices: [a, b, c], color } => {
            surface.fill_triangle(p(*a), p(*b), p(*c), *color);
        }
        Face::Quad {
            indices: [a, b, c, d],
            color,
            ..
        } => {
            surface.fill_triangle(p(*a), p(*b), p(*c), *color);
            surface.fill_triangle(p(*d), p(*b), p(*c), *color);
        }
    }
}
