//! Palette-indexed colors.
//!
//! Surfaces store one [`Color`] per pixel: a small index into a [`Palette`]
//! of ARGB8888 entries. Index 0 is reserved as "transparent / unset" and is
//! never written by the texture mapper.

/// A palette index. `0` is [`TRANSPARENT`].
pub type Color = u8;

/// The transparency sentinel.
pub const TRANSPARENT: Color = 0;

/// Number of entries in the default palette.
pub const PALETTE_SIZE: usize = 16;

/// Default 16-color palette in ARGB8888. Entry 0 is only used for display.
pub const DEFAULT_PALETTE: [u32; PALETTE_SIZE] = [
    0xFF000000, // transparent (shown as black)
    0xFFFFFFFF, // white
    0xFFFF2121, // red
    0xFFFF93C4, // pink
    0xFFFF8135, // orange
    0xFFFFF609, // yellow
    0xFF249CA3, // teal
    0xFF78DC52, // green
    0xFF003FAD, // blue
    0xFF87F2FF, // light blue
    0xFF8E2EC4, // purple
    0xFFA4839F, // light purple
    0xFF5C406C, // dark purple
    0xFFE5CDC4, // tan
    0xFF91463D, // brown
    0xFF000000, // black
];

/// Maps palette indices to ARGB8888 and back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<u32>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    /// Builds a palette from ARGB entries. Entry 0 stays the transparent slot.
    pub fn new(entries: Vec<u32>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ARGB value for `color`; indices past the end wrap around.
    #[inline]
    pub fn argb(&self, color: Color) -> u32 {
        if self.entries.is_empty() {
            return 0;
        }
        self.entries[color as usize % self.entries.len()]
    }

    /// Closest opaque palette index to an ARGB value (squared RGB distance).
    ///
    /// Fully transparent input maps to [`TRANSPARENT`].
    pub fn nearest(&self, argb: u32) -> Color {
        if argb >> 24 == 0 {
            return TRANSPARENT;
        }
        let (r, g, b) = unpack_rgb(argb);

        let mut best = 1;
        let mut best_distance = u32::MAX;
        for (index, &entry) in self.entries.iter().enumerate().skip(1) {
            let (er, eg, eb) = unpack_rgb(entry);
            let distance = sq_diff(r, er) + sq_diff(g, eg) + sq_diff(b, eb);
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        best.min(Color::MAX as usize) as Color
    }
}

#[inline]
fn unpack_rgb(argb: u32) -> (u8, u8, u8) {
    ((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
}

#[inline]
fn sq_diff(a: u8, b: u8) -> u32 {
    let d = a as i32 - b as i32;
    (d * d) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_wraps_out_of_range_indices() {
        let palette = Palette::default();
        assert_eq!(palette.argb(2), 0xFFFF2121);
        assert_eq!(palette.argb(18), palette.argb(2));
    }

    #[test]
    fn nearest_finds_exact_entries() {
        let palette = Palette::default();
        assert_eq!(palette.nearest(0xFFFFFFFF), 1);
        assert_eq!(palette.nearest(0xFF78DC52), 7);
    }

    #[test]
    fn nearest_never_returns_transparent_for_opaque_input() {
        let palette = Palette::default();
        // Pure black matches entry 15, not the reserved slot 0.
        assert_eq!(palette.nearest(0xFF000000), 15);
        assert_eq!(palette.nearest(0x00FFFFFF), TRANSPARENT);
    }
}
