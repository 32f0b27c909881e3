//! A small CPU software renderer for palette-indexed surfaces.
//!
//! Meshes made of flat-colored triangles and quads are rotated, projected,
//! depth-sorted back-to-front and flat-filled onto a [`Surface`], with an
//! optional forward texture scatter for quads. There is no z-buffer, no
//! clipping and no per-pixel depth: the pipeline trades accuracy for a
//! handful of float operations per vertex and per texel, which suits
//! low-power targets that redraw every frame.
//!
//! # Quick Start
//!
//! ```
//! use polymesh::prelude::*;
//!
//! let mesh = Mesh::cube(20.0, [2, 4, 5, 7, 8, 10]);
//! let mut ctx = RenderContext::new();
//! ctx.set_angle(Axis::Y, 0.6).set_angle(Axis::X, 0.4);
//!
//! let mut screen = Image::new(160, 120);
//! let stats = polymesh::render(&mesh, &mut screen, &ctx)?;
//! assert!(stats.drawn > 0);
//! # Ok::<(), polymesh::RenderError>(())
//! ```

// Public API - exposed to library consumers
pub mod context;
pub mod error;
pub mod math;
pub mod mesh;
pub mod palette;
pub mod pipeline;
pub mod render;

#[cfg(feature = "viewer")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use context::{Axis, Camera, CullMode, Orientation, RenderContext};
pub use error::{LoadError, RenderError};
pub use mesh::{Face, Mesh};
pub use palette::{Color, Palette, TRANSPARENT};
pub use pipeline::sort::SortMethod;
pub use pipeline::{render, FrameStats};
pub use render::{Image, Surface};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use polymesh::prelude::*;
/// ```
pub mod prelude {
    // State
    pub use crate::context::{Axis, Camera, CullMode, Orientation, RenderContext};

    // Mesh
    pub use crate::mesh::{Face, Mesh};

    // Pipeline
    pub use crate::pipeline::sort::{DepthSorter, SortMethod};
    pub use crate::pipeline::transform::TransformedVertex;
    pub use crate::pipeline::{render, FrameStats};

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Surfaces
    pub use crate::palette::{Color, Palette, TRANSPARENT};
    pub use crate::render::{Image, Surface};
}
