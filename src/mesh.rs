//! Mesh storage and editing.
//!
//! A [`Mesh`] owns an ordered vertex list and an ordered face list. Faces
//! refer to vertices by position; nothing here keeps those references valid
//! when vertices are removed. The render pipeline checks every index before
//! drawing and reports [`RenderError::IndexOutOfRange`] instead.

use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, RenderError};
use crate::math::vec3::Vec3;
use crate::palette::{Color, TRANSPARENT};
use crate::render::Image;

/// A flat-colored polygon referencing mesh vertices by index.
///
/// Quads are split into triangles `(0, 1, 2)` and `(3, 1, 2)` when drawn, so
/// index 0 and index 3 must be opposite corners. Only quads can carry a
/// texture; corners 0..4 map to the texture's top-left, top-right,
/// bottom-left and bottom-right.
#[derive(Clone, Debug, PartialEq)]
pub enum Face {
    Triangle {
        indices: [usize; 3],
        color: Color,
    },
    Quad {
        indices: [usize; 4],
        color: Color,
        texture: Option<Arc<Image>>,
    },
}

impl Face {
    pub fn triangle(a: usize, b: usize, c: usize, color: Color) -> Self {
        Face::Triangle {
            indices: [a, b, c],
            color,
        }
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize, color: Color) -> Self {
        Face::Quad {
            indices: [a, b, c, d],
            color,
            texture: None,
        }
    }

    pub fn textured_quad(
        a: usize,
        b: usize,
        c: usize,
        d: usize,
        color: Color,
        texture: Arc<Image>,
    ) -> Self {
        Face::Quad {
            indices: [a, b, c, d],
            color,
            texture: Some(texture),
        }
    }

    /// The 3 or 4 vertex indices of this face.
    pub fn indices(&self) -> &[usize] {
        match self {
            Face::Triangle { indices, .. } => indices,
            Face::Quad { indices, .. } => indices,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Face::Triangle { color, .. } | Face::Quad { color, .. } => *color,
        }
    }

    pub fn texture(&self) -> Option<&Image> {
        match self {
            Face::Triangle { .. } => None,
            Face::Quad { texture, .. } => texture.as_deref(),
        }
    }
}

/// Vertex and face lists for one renderable object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// An axis-aligned cube centered on the origin, one quad per side.
    ///
    /// `colors` are assigned in the order front (-z), back (+z), left (-x),
    /// right (+x), top (-y), bottom (+y).
    pub fn cube(half_extent: f32, colors: [Color; 6]) -> Self {
        let h = half_extent;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(-h, h, h),
            Vec3::new(h, h, h),
        ];
        let sides = [
            [0, 1, 2, 3],
            [5, 4, 7, 6],
            [4, 0, 6, 2],
            [1, 5, 3, 7],
            [4, 5, 0, 1],
            [2, 3, 6, 7],
        ];
        let faces = sides
            .iter()
            .zip(colors)
            .map(|(&[a, b, c, d], color)| Face::quad(a, b, c, d, color))
            .collect();
        Self { vertices, faces }
    }

    /// Load every object in an OBJ file into a single mesh.
    ///
    /// Triangles and quads are kept as-is; any other polygon is an error.
    /// All faces get `color`.
    pub fn from_obj<P: AsRef<Path>>(path: P, color: Color) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: false,
                triangulate: false,
                ignore_points: true,
                ignore_lines: true,
                ..Default::default()
            },
        )?;

        let mut mesh = Mesh::default();
        for model in &models {
            let offset = mesh.vertices.len();
            mesh.vertices.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            let indices = &model.mesh.indices;
            let arities: Vec<usize> = if model.mesh.face_arities.is_empty() {
                vec![3; indices.len() / 3]
            } else {
                model.mesh.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let corner = |i: usize| offset + indices[start + i] as usize;
                let face = match arity {
                    3 => Face::triangle(corner(0), corner(1), corner(2), color),
                    // OBJ lists quads as a loop; our corner order needs 0 and 3 opposite.
                    4 => Face::quad(corner(0), corner(1), corner(3), corner(2), color),
                    _ => {
                        return Err(LoadError::UnsupportedArity {
                            face: mesh.faces.len(),
                            arity,
                        })
                    }
                };
                mesh.faces.push(face);
                start += arity;
            }
        }

        log::debug!(
            "loaded {} ({} objects, {} vertices, {} faces)",
            path.display(),
            models.len(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    // ============ Vertices ============

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    /// Writes the vertex at `index`, growing the list with origin vertices
    /// if `index` is past the end.
    pub fn set_vertex(&mut self, index: usize, vertex: Vec3) {
        if index >= self.vertices.len() {
            self.vertices.resize(index + 1, Vec3::ZERO);
        }
        self.vertices[index] = vertex;
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: Vec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Removes the vertex at `index`, shifting later vertices down by one.
    /// Face indices are not rewritten.
    pub fn remove_vertex(&mut self, index: usize) -> Option<Vec3> {
        (index < self.vertices.len()).then(|| self.vertices.remove(index))
    }

    // ============ Faces ============

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// Writes the face at `index`, growing the list with degenerate
    /// transparent triangles if `index` is past the end.
    pub fn set_face(&mut self, index: usize, face: Face) {
        if index >= self.faces.len() {
            self.faces
                .resize(index + 1, Face::triangle(0, 0, 0, TRANSPARENT));
        }
        self.faces[index] = face;
    }

    /// Appends a face and returns its index.
    pub fn push_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Removes the face at `index`, shifting later faces down by one.
    pub fn remove_face(&mut self, index: usize) -> Option<Face> {
        (index < self.faces.len()).then(|| self.faces.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Checks that every face index refers to an existing vertex.
    pub fn validate(&self) -> Result<(), RenderError> {
        let vertex_count = self.vertices.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(RenderError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cube_has_eight_vertices_and_six_quads() {
        let mesh = Mesh::cube(1.0, [1, 2, 3, 4, 5, 6]);
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.faces().len(), 6);
        assert!(mesh.faces().iter().all(|f| f.indices().len() == 4));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn cube_quads_put_opposite_corners_at_zero_and_three() {
        let mesh = Mesh::cube(1.0, [1; 6]);
        for face in mesh.faces() {
            let idx = face.indices();
            let a = mesh.vertex(idx[0]).unwrap();
            let d = mesh.vertex(idx[3]).unwrap();
            // Opposite corners of a unit face differ on exactly two axes.
            let differing = [a.x != d.x, a.y != d.y, a.z != d.z]
                .iter()
                .filter(|&&b| b)
                .count();
            assert_eq!(differing, 2, "face {idx:?}");
        }
    }

    #[test]
    fn set_vertex_grows_with_origin_vertices() {
        let mut mesh = Mesh::default();
        mesh.set_vertex(2, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertex(0), Some(Vec3::ZERO));
        assert_eq!(mesh.vertex(2), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn set_face_replaces_in_place() {
        let mut mesh = Mesh::cube(1.0, [1; 6]);
        mesh.set_face(0, Face::triangle(0, 1, 2, 9));
        assert_eq!(mesh.faces().len(), 6);
        assert_eq!(mesh.face(0).unwrap().color(), 9);
        assert!(mesh.face(0).unwrap().texture().is_none());
    }

    #[test]
    fn remove_out_of_range_returns_none() {
        let mut mesh = Mesh::cube(1.0, [1; 6]);
        assert!(mesh.remove_face(6).is_none());
        assert!(mesh.remove_vertex(8).is_none());
        assert!(mesh.remove_face(5).is_some());
        assert_eq!(mesh.faces().len(), 5);
    }

    #[test]
    fn validate_reports_first_bad_index() {
        let mut mesh = Mesh::cube(1.0, [1; 6]);
        mesh.remove_vertex(7);
        assert_eq!(
            mesh.validate(),
            Err(RenderError::IndexOutOfRange {
                face: 1,
                index: 7,
                vertex_count: 7,
            })
        );
    }

    #[test]
    fn from_obj_keeps_triangles_and_quads() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        writeln!(
            file,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nf 1 2 3 4\nf 1 2 5"
        )
        .unwrap();

        let mesh = Mesh::from_obj(file.path(), 4).unwrap();
        assert_eq!(mesh.vertices().len(), 5);
        assert_eq!(mesh.faces().len(), 2);
        // Loop 0-1-2-3 is reordered so corners 0 and 3 are opposite.
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 3, 2]);
        assert_eq!(mesh.faces()[1].indices(), &[0, 1, 4]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn from_obj_rejects_pentagons() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        writeln!(
            file,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nf 1 2 3 4 5"
        )
        .unwrap();

        assert!(matches!(
            Mesh::from_obj(file.path(), 4),
            Err(LoadError::UnsupportedArity { arity: 5, .. })
        ));
    }
}
