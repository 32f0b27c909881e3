//! Per-face visibility tests.
//!
//! Both tests are cheap heuristics rather than exact clipping:
//!
//! - the depth cull compares every vertex against a single threshold
//!   (direction chosen by [`CullMode`]) plus a fixed near limit in front of
//!   the eye;
//! - the screen-bounds cull rejects a face only when every vertex lies off
//!   the surface, so a large face whose corners all sit outside the surface
//!   is dropped even if it covers it.

use super::transform::TransformedVertex;
use crate::context::{CullMode, RenderContext};

/// Faces with any vertex at or nearer than this depth are never drawn.
///
/// Sits between the eye and the projection singularity at
/// `-FOCAL_LENGTH`, where projected coordinates blow up and flip.
pub const NEAR_LIMIT: f32 = -100.0;

/// Outcome of the visibility tests for one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Rejected by the depth threshold or the near limit.
    DepthCulled,
    /// Every vertex lies outside the surface.
    Offscreen,
}

/// Whether any vertex crosses the depth threshold in the direction given by
/// `mode`, or reaches [`NEAR_LIMIT`].
pub fn depth_culled(
    indices: &[usize],
    vertices: &[TransformedVertex],
    mode: CullMode,
    threshold: f32,
) -> bool {
    indices.iter().any(|&i| {
        let z = vertices[i].view_z;
        let crosses = match mode {
            CullMode::Outer => z > threshold,
            CullMode::Inner => z < threshold,
        };
        crosses || z <= NEAR_LIMIT
    })
}

/// Whether every vertex lies outside the `width` x `height` rectangle.
pub fn offscreen(indices: &[usize], vertices: &[TransformedVertex], width: u32, height: u32) -> bool {
    let (width, height) = (width as f32, height as f32);
    indices.iter().all(|&i| {
        let p = vertices[i].screen;
        !(p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height)
    })
}

/// Runs the depth cull, then the screen-bounds cull.
pub fn classify(
    indices: &[usize],
    vertices: &[TransformedVertex],
    ctx: &RenderContext,
    width: u32,
    height: u32,
) -> Visibility {
    if depth_culled(indices, vertices, ctx.cull_mode(), ctx.depth_threshold()) {
        Visibility::DepthCulled
    } else if offscreen(indices, vertices, width, height) {
        Visibility::Offscreen
    } else {
        Visibility::Visible
    }
}
