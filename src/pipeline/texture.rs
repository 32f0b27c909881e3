//! Forward texture scatter onto quads.
//!
//! Instead of sampling the texture for each covered screen pixel, every
//! texel is pushed to the screen position obtained by bilinearly blending
//! the quad's four projected corners:
//!
//! ```text
//!   c0 ──────── c1        top    = lerp(c0, c1, fx)
//!   │            │        bottom = lerp(c2, c3, fx)
//!   │   (fx,fy)  │        dest   = lerp(top, bottom, fy)
//!   c2 ──────── c3
//! ```
//!
//! This is cheap and needs no per-pixel division, but it is not
//! perspective-correct and leaves holes wherever the quad is larger on
//! screen than the texture. Each texel is therefore replicated into a
//! `block x block` square of scatter points, with the block factor growing
//! with the mesh's magnification; holes become rarer but are not
//! eliminated. The replication is virtual, so no upscaled copy of the
//! texture is ever allocated. Later texels overwrite earlier ones.

use crate::math::vec2::Vec2;
use crate::palette::TRANSPARENT;
use crate::render::{Image, Surface};

/// Multiplier applied to the magnification before rounding up to the block
/// factor.
pub const TEXTURE_UPSCALE_BIAS: f32 = 1.2;

/// Upper bound on the block factor, which bounds the scatter points per
/// face at `MAX_BLOCK_FACTOR²` times the texel count.
pub const MAX_BLOCK_FACTOR: u32 = 16;

/// `ceil(max(1, magnification) * TEXTURE_UPSCALE_BIAS)`, at most
/// [`MAX_BLOCK_FACTOR`].
pub fn block_factor(magnification: f32) -> u32 {
    let factor = (magnification.max(1.0) * TEXTURE_UPSCALE_BIAS).ceil();
    (factor as u32).clamp(1, MAX_BLOCK_FACTOR)
}

/// Scatters `texture` over the quad with screen corners `corners`
/// (top-left, top-right, bottom-left, bottom-right), after replicating each
/// texel into a `block x block` square. Transparent texels are skipped.
pub fn scatter_texture<S: Surface + ?Sized>(
    texture: &Image,
    corners: [Vec2; 4],
    block: u32,
    surface: &mut S,
) {
    let (texture_width, texture_height) = (texture.width() as usize, texture.height() as usize);
    if texture_width == 0 || texture_height == 0 {
        return;
    }

    let block = block.max(1) as usize;
    let width = (texture_width * block) as f32;
    let height = (texture_height * block) as f32;
    let [c0, c1, c2, c3] = corners;

    for y in 0..texture_height * block {
        let fy = y as f32 / height;
        let row_start = (y / block) * texture_width;
        let row = &texture.pixels()[row_start..row_start + texture_width];
        for x in 0..texture_width * block {
            let color = row[x / block];
            if color == TRANSPARENT {
                continue;
            }
            let fx = x as f32 / width;
            let dest = c0.lerp(c1, fx).lerp(c2.lerp(c3, fx), fy);
            surface.set_pixel(dest.x.floor() as i32, dest.y.floor() as i32, color);
        }
    }
}
