// ============================================================================
// SAMPLER — output-pixel → source-pixel mapping and bilinear fetch
// ============================================================================

use image::RgbaImage;

/// Flat paper color rendered for every output pixel whose mapped source
/// coordinate falls outside the image. Alpha is always opaque.
pub const BACKGROUND: [u8; 4] = [245, 245, 245, 255];

/// BT.709 luminance of a normalized RGB triple.
#[inline]
pub fn luma(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// The photograph being stylized. Immutable once constructed; replaced
/// wholesale when the user opens a new file.
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the raw pixel grid (used by the analyzer's filtered downsample).
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when a source-pixel coordinate lies inside `[0, W] × [0, H]`.
    /// Out-of-bounds pixels render as [`BACKGROUND`] and skip every later
    /// pipeline stage. An image with a zero dimension contains nothing, so
    /// no fetch ever runs against an empty pixel grid.
    #[inline]
    pub fn contains(&self, sx: f32, sy: f32) -> bool {
        self.width() > 0
            && self.height() > 0
            && sx >= 0.0
            && sx <= self.width() as f32
            && sy >= 0.0
            && sy <= self.height() as f32
    }

    /// Fetch one texel with edge clamping, normalized to [0, 1].
    #[inline]
    fn texel(&self, x: i32, y: i32) -> [f32; 3] {
        let cx = x.clamp(0, (self.width() as i32 - 1).max(0)) as u32;
        let cy = y.clamp(0, (self.height() as i32 - 1).max(0)) as u32;
        let p = self.pixels.get_pixel(cx, cy);
        [
            p[0] as f32 / 255.0,
            p[1] as f32 / 255.0,
            p[2] as f32 / 255.0,
        ]
    }

    /// Bilinear RGB sample at a fractional source-pixel coordinate. Texel
    /// centers sit at half-integers, so sampling at `(x + 0.5, y + 0.5)`
    /// returns texel `(x, y)` exactly — a 1:1 centered view reproduces the
    /// photo bit-for-bit. Edge texels clamp, so boundary coordinates stay
    /// valid.
    pub fn sample_bilinear(&self, fx: f32, fy: f32) -> [f32; 3] {
        let gx = fx - 0.5;
        let gy = fy - 0.5;
        let x0 = gx.floor() as i32;
        let y0 = gy.floor() as i32;
        let dx = gx - x0 as f32;
        let dy = gy - y0 as f32;

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x0 + 1, y0);
        let p01 = self.texel(x0, y0 + 1);
        let p11 = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0f32; 3];
        for c in 0..3 {
            out[c] = p00[c] * (1.0 - dx) * (1.0 - dy)
                + p10[c] * dx * (1.0 - dy)
                + p01[c] * (1.0 - dx) * dy
                + p11[c] * dx * dy;
        }
        out
    }

    /// Bilinear BT.709 luminance at a fractional source-pixel coordinate.
    #[inline]
    pub fn luma_bilinear(&self, fx: f32, fy: f32) -> f32 {
        luma(self.sample_bilinear(fx, fy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, v: u8) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255])))
    }

    #[test]
    fn contains_matches_source_extent() {
        let src = solid(10, 6, 128);
        assert!(src.contains(0.0, 0.0));
        assert!(src.contains(10.0, 6.0));
        assert!(!src.contains(-0.01, 3.0));
        assert!(!src.contains(10.01, 3.0));
        assert!(!src.contains(5.0, 6.01));
    }

    #[test]
    fn empty_image_contains_nothing() {
        let empty = SourceImage::new(RgbaImage::new(0, 0));
        assert!(!empty.contains(0.0, 0.0));
        let row = SourceImage::new(RgbaImage::new(4, 0));
        assert!(!row.contains(2.0, 0.0));
    }

    #[test]
    fn bilinear_interpolates_between_texels() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        let src = SourceImage::new(img);
        // Halfway between the two texel centers.
        let mid = src.sample_bilinear(1.0, 0.5);
        assert!((mid[0] - 0.5).abs() < 1e-3);
        // Half-integer coordinates hit texel centers exactly.
        assert!((src.sample_bilinear(0.5, 0.5)[0]).abs() < 1e-6);
        assert!((src.sample_bilinear(1.5, 0.5)[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn luma_uses_bt709_weights() {
        assert!((luma([1.0, 0.0, 0.0]) - 0.2126).abs() < 1e-6);
        assert!((luma([0.0, 1.0, 0.0]) - 0.7152).abs() < 1e-6);
        assert!((luma([0.0, 0.0, 1.0]) - 0.0722).abs() < 1e-6);
        assert!((luma([1.0, 1.0, 1.0]) - 1.0).abs() < 1e-4);
    }
}
