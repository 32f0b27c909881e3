//! Vertex transform: mesh space to screen space.
//!
//! Each vertex is scaled by the context's size, offset by the camera
//! position, rotated about Y, then X, then Z, and finally projected with a
//! fixed focal length:
//!
//! ```text
//! scale    = FOCAL_LENGTH / (FOCAL_LENGTH + view_z)
//! screen_x = center_x + x * scale * zoom
//! screen_y = center_y + y * scale * zoom
//! ```
//!
//! The rotated (pre-projection) depth is kept as `view_z` for sorting and
//! culling.

use crate::context::RenderContext;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Distance from the eye to the projection plane.
pub const FOCAL_LENGTH: f32 = 150.0;

/// Smallest magnitude allowed for the perspective denominator.
pub const PERSPECTIVE_EPSILON: f32 = 1e-3;

/// A vertex after transform and projection. Lives for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformedVertex {
    /// Pixel coordinates on the target surface.
    pub screen: Vec2,
    /// Camera-space depth after rotation, before perspective division.
    pub view_z: f32,
}

/// Rotates a camera-relative point about Y, then X, then Z.
#[inline]
pub fn rotate(point: Vec3, ctx: &RenderContext) -> Vec3 {
    let orientation = ctx.orientation();
    point
        .rotate_y(orientation.y)
        .rotate_x(orientation.x)
        .rotate_z(orientation.z)
}

/// Perspective scale for a given view depth, with the denominator kept at
/// least [`PERSPECTIVE_EPSILON`] away from zero.
#[inline]
pub fn perspective_scale(view_z: f32) -> f32 {
    let mut denominator = FOCAL_LENGTH + view_z;
    if denominator.abs() < PERSPECTIVE_EPSILON {
        denominator = PERSPECTIVE_EPSILON.copysign(denominator);
    }
    FOCAL_LENGTH / denominator
}

/// Transforms a single mesh vertex. `center` is the surface midpoint.
pub fn transform_vertex(vertex: Vec3, ctx: &RenderContext, center: Vec2) -> TransformedVertex {
    let camera = ctx.camera();
    let view = rotate(vertex * ctx.size() - camera.position(), ctx);
    let scale = perspective_scale(view.z) * camera.zoom();

    TransformedVertex {
        screen: Vec2::new(center.x + view.x * scale, center.y + view.y * scale),
        view_z: view.z,
    }
}

/// Transforms every vertex for a `width` x `height` surface, preserving order.
pub fn transform_vertices(
    vertices: &[Vec3],
    ctx: &RenderContext,
    width: u32,
    height: u32,
) -> Vec<TransformedVertex> {
    let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    vertices
        .iter()
        .map(|&v| transform_vertex(v, ctx, center))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Axis;
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    const CENTER: Vec2 = Vec2::new(80.0, 60.0);

    #[test]
    fn origin_maps_to_surface_center() {
        let ctx = RenderContext::new();
        let out = transform_vertices(&[Vec3::ZERO], &ctx, 160, 120);
        assert_eq!(out[0].screen, CENTER);
        assert_eq!(out[0].view_z, 0.0);
    }

    #[test]
    fn perspective_shrinks_distant_points() {
        let ctx = RenderContext::new();
        let near = transform_vertex(Vec3::new(10.0, 0.0, 0.0), &ctx, CENTER);
        let far = transform_vertex(Vec3::new(10.0, 0.0, 150.0), &ctx, CENTER);
        assert_relative_eq!(near.screen.x, 90.0);
        // scale = 150 / 300
        assert_relative_eq!(far.screen.x, 85.0);
        assert_relative_eq!(far.view_z, 150.0);
    }

    #[test]
    fn zoom_and_size_scale_screen_offsets() {
        let mut ctx = RenderContext::new();
        ctx.set_zoom(2.0);
        let zoomed = transform_vertex(Vec3::new(10.0, 5.0, 0.0), &ctx, CENTER);
        assert_relative_eq!(zoomed.screen.x, 100.0);
        assert_relative_eq!(zoomed.screen.y, 70.0);

        ctx.set_zoom(1.0).set_size(3.0);
        let sized = transform_vertex(Vec3::new(10.0, 0.0, 0.0), &ctx, CENTER);
        assert_relative_eq!(sized.screen.x, 110.0);
    }

    #[test]
    fn camera_offset_is_subtracted_before_rotation() {
        let mut ctx = RenderContext::new();
        ctx.set_camera_position(Vec3::new(10.0, 0.0, 0.0));
        let v = transform_vertex(Vec3::new(10.0, 0.0, 0.0), &ctx, CENTER);
        assert_eq!(v.screen, CENTER);
    }

    #[test]
    fn full_turn_on_each_axis_is_identity() {
        let vertex = Vec3::new(12.0, -7.0, 30.0);
        let reference = transform_vertex(vertex, &RenderContext::new(), CENTER);

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mut ctx = RenderContext::new();
            ctx.set_angle(axis, TAU);
            let turned = transform_vertex(vertex, &ctx, CENTER);
            assert_relative_eq!(turned.screen.x, reference.screen.x, epsilon = 1e-3);
            assert_relative_eq!(turned.screen.y, reference.screen.y, epsilon = 1e-3);
            assert_relative_eq!(turned.view_z, reference.view_z, epsilon = 1e-3);
        }
    }

    #[test]
    fn rotation_order_is_y_then_x_then_z() {
        let mut ctx = RenderContext::new();
        ctx.set_angle(Axis::Y, 0.4)
            .set_angle(Axis::X, -1.1)
            .set_angle(Axis::Z, 2.3);
        let p = Vec3::new(3.0, 4.0, 5.0);
        let expected = p.rotate_y(0.4).rotate_x(-1.1).rotate_z(2.3);
        assert_eq!(rotate(p, &ctx), expected);
    }

    #[test]
    fn degenerate_depth_is_clamped() {
        let scale = perspective_scale(-FOCAL_LENGTH);
        assert!(scale.is_finite());
        assert_relative_eq!(scale, FOCAL_LENGTH / PERSPECTIVE_EPSILON);

        let ctx = RenderContext::new();
        let v = transform_vertex(Vec3::new(1.0, 1.0, -FOCAL_LENGTH), &ctx, CENTER);
        assert!(v.screen.x.is_finite() && v.screen.y.is_finite());
    }
}
