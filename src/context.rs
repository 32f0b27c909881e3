//! Caller-owned render state.
//!
//! A [`RenderContext`] bundles everything the pipeline reads besides the mesh
//! and the surface: orientation angles, camera position and zoom, uniform
//! mesh size, sorting strategy and culling mode. Mutators return `&mut Self`
//! for chaining:
//!
//! ```
//! use polymesh::{Axis, RenderContext, SortMethod};
//!
//! let mut ctx = RenderContext::new();
//! ctx.change_angle(Axis::Y, 0.1)
//!     .set_camera_axis(Axis::Z, -40.0)
//!     .set_sort_method(SortMethod::Stable);
//! ```

use crate::math::vec3::Vec3;
use crate::pipeline::sort::SortMethod;

/// Depth beyond which faces are culled in [`CullMode::Outer`].
pub const DEFAULT_DEPTH_THRESHOLD: f32 = 1000.0;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction of the depth cull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Drop faces with a vertex farther than the threshold.
    #[default]
    Outer,
    /// Drop faces with a vertex nearer than the threshold, for viewing a
    /// mesh from the inside.
    Inner,
}

/// Rotation angles in radians around each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set_angle(&mut self, axis: Axis, angle: f32) -> &mut Self {
        *self.angle_mut(axis) = angle;
        self
    }

    pub fn rotate(&mut self, axis: Axis, delta: f32) -> &mut Self {
        *self.angle_mut(axis) += delta;
        self
    }

    fn angle_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Camera position and screen-space zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, zoom: f32) -> Self {
        Self { position, zoom }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.position.x,
            Axis::Y => self.position.y,
            Axis::Z => self.position.z,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f32) -> &mut Self {
        *self.axis_mut(axis) = value;
        self
    }

    pub fn translate(&mut self, axis: Axis, delta: f32) -> &mut Self {
        *self.axis_mut(axis) += delta;
        self
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        self.zoom = zoom;
        self
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.position.x,
            Axis::Y => &mut self.position.y,
            Axis::Z => &mut self.position.z,
        }
    }
}

/// Everything the pipeline reads besides the mesh and the target surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    orientation: Orientation,
    camera: Camera,
    size: f32,
    sort_method: SortMethod,
    cull_mode: CullMode,
    depth_threshold: f32,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            camera: Camera::default(),
            size: 1.0,
            sort_method: SortMethod::default(),
            cull_mode: CullMode::default(),
            depth_threshold: DEFAULT_DEPTH_THRESHOLD,
        }
    }
}

impl RenderContext {
    /// Identity orientation, camera at the origin, zoom and size of 1.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Orientation ============

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.orientation
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.orientation.angle(axis)
    }

    /// Set the rotation around `axis` (radians).
    pub fn set_angle(&mut self, axis: Axis, angle: f32) -> &mut Self {
        self.orientation.set_angle(axis, angle);
        self
    }

    /// Add `delta` radians to the rotation around `axis`.
    pub fn change_angle(&mut self, axis: Axis, delta: f32) -> &mut Self {
        self.orientation.rotate(axis, delta);
        self
    }

    // ============ Camera ============

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera_position(&mut self, position: Vec3) -> &mut Self {
        self.camera.set_position(position);
        self
    }

    pub fn set_camera_axis(&mut self, axis: Axis, value: f32) -> &mut Self {
        self.camera.set_axis(axis, value);
        self
    }

    pub fn change_camera_axis(&mut self, axis: Axis, delta: f32) -> &mut Self {
        self.camera.translate(axis, delta);
        self
    }

    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        self.camera.set_zoom(zoom);
        self
    }

    // ============ Size ============

    /// Uniform scale applied to mesh coordinates before the camera offset.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) -> &mut Self {
        self.size = size;
        self
    }

    pub fn change_size(&mut self, delta: f32) -> &mut Self {
        self.size += delta;
        self
    }

    /// Combined on-screen enlargement of the mesh: `zoom * size`.
    pub fn magnification(&self) -> f32 {
        self.camera.zoom * self.size
    }

    // ============ Pipeline options ============

    pub fn sort_method(&self) -> SortMethod {
        self.sort_method
    }

    pub fn set_sort_method(&mut self, method: SortMethod) -> &mut Self {
        self.sort_method = method;
        self
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) -> &mut Self {
        self.cull_mode = mode;
        self
    }

    /// Shorthand for switching between [`CullMode::Inner`] and
    /// [`CullMode::Outer`].
    pub fn set_inner(&mut self, inner: bool) -> &mut Self {
        self.cull_mode = if inner { CullMode::Inner } else { CullMode::Outer };
        self
    }

    pub fn depth_threshold(&self) -> f32 {
        self.depth_threshold
    }

    pub fn set_depth_threshold(&mut self, threshold: f32) -> &mut Self {
        self.depth_threshold = threshold;
        self
    }
}
