//! Small vector types used by the pipeline.

pub mod vec2;
pub mod vec3;

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
