//! The per-frame render pipeline.
//!
//! ```text
//! Mesh ─► transform ─► sort ─► for each face: visibility ─► raster ─► texture
//! ```
//!
//! [`render`] runs every stage to completion and keeps nothing between
//! calls; all state lives in the [`Mesh`], the [`RenderContext`] and the
//! target [`Surface`].

pub mod raster;
pub mod sort;
pub mod texture;
pub mod transform;
pub mod visibility;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::mesh::{Face, Mesh};
use crate::render::Surface;
use sort::DepthSorter;
use visibility::Visibility;

/// Per-frame counters returned by [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces in the mesh.
    pub faces: usize,
    /// Faces that were filled.
    pub drawn: usize,
    /// Faces rejected by the depth cull.
    pub depth_culled: usize,
    /// Faces rejected because every vertex was off-surface.
    pub offscreen_culled: usize,
    /// Drawn faces that also received a texture.
    pub textured: usize,
}

/// Draws `mesh` onto `surface` using the orientation, camera and options in
/// `ctx`. The surface is not cleared first.
///
/// Face indices are validated before anything is drawn; a bad index leaves
/// the surface untouched.
pub fn render<S: Surface + ?Sized>(
    mesh: &Mesh,
    surface: &mut S,
    ctx: &RenderContext,
) -> Result<FrameStats, RenderError> {
    mesh.validate()?;

    let (width, height) = (surface.width(), surface.height());
    let vertices = transform::transform_vertices(mesh.vertices(), ctx, width, height);

    let mut order = sort::depth_keys(mesh.faces(), &vertices);
    ctx.sort_method().sort(&mut order);

    let block = texture::block_factor(ctx.magnification());
    let mut stats = FrameStats {
        faces: mesh.faces().len(),
        ..FrameStats::default()
    };

    for key in &order {
        let face = &mesh.faces()[key.face];
        match visibility::classify(face.indices(), &vertices, ctx, width, height) {
            Visibility::DepthCulled => {
                stats.depth_culled += 1;
                continue;
            }
            Visibility::Offscreen => {
                stats.offscreen_culled += 1;
                continue;
            }
            Visibility::Visible => {}
        }

        raster::rasterize_face(face, &vertices, surface);
        stats.drawn += 1;

        if let Face::Quad {
            indices,
            texture: Some(image),
            ..
        } = face
        {
            let corners = indices.map(|i| vertices[i].screen);
            texture::scatter_texture(image, corners, block, surface);
            stats.textured += 1;
        }
    }

    log::trace!(
        "frame: {} faces, {} drawn, {} depth-culled, {} offscreen, {} textured ({})",
        stats.faces,
        stats.drawn,
        stats.depth_culled,
        stats.offscreen_culled,
        stats.textured,
        ctx.sort_method()
    );

    Ok(stats)
}
