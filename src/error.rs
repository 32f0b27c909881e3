//! Error types for rendering and asset loading.

use thiserror::Error;

/// Errors raised by [`crate::pipeline::render`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Errors raised while loading meshes or textures from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("face {face} has {arity} vertices; only triangles and quads are supported")]
    UnsupportedArity { face: usize, arity: usize },
    #[error("pixel data of length {len} does not match a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}
