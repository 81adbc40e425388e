// ============================================================================
// EDGE DETECTOR — 3×3 Sobel on BT.709 luminance
// ============================================================================

use super::sampler::SourceImage;

/// Fixed gradient-to-strength scale. The raw Sobel magnitude on a [0,1]
/// luminance field is small for natural photos; this brings typical edges
/// close to full strength before the clamp.
pub const SOBEL_SENSITIVITY: f32 = 3.5;

/// Normalized edge strength at a source-pixel coordinate.
///
/// Samples the eight neighbors at one-pixel offsets, applies the horizontal
/// and vertical Sobel kernels to their luminance, and clamps the scaled
/// gradient magnitude to [0, 1]. Pure function: identical inputs produce
/// bit-identical output.
pub fn edge_strength(src: &SourceImage, sx: f32, sy: f32) -> f32 {
    let lum = |dx: f32, dy: f32| src.luma_bilinear(sx + dx, sy + dy);

    let tl = lum(-1.0, -1.0);
    let tc = lum(0.0, -1.0);
    let tr = lum(1.0, -1.0);
    let ml = lum(-1.0, 0.0);
    let mr = lum(1.0, 0.0);
    let bl = lum(-1.0, 1.0);
    let bc = lum(0.0, 1.0);
    let br = lum(1.0, 1.0);

    // Gx = [-1 0 1; -2 0 2; -1 0 1], Gy = [-1 -2 -1; 0 0 0; 1 2 1]
    // Grouped as pairwise differences so equal neighbors cancel exactly and a
    // flat neighborhood yields a gradient of precisely zero.
    let gx = (tr - tl) + 2.0 * (mr - ml) + (br - bl);
    let gy = (bl - tl) + 2.0 * (bc - tc) + (br - tr);

    ((gx * gx + gy * gy).sqrt() * SOBEL_SENSITIVITY).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn uniform_image_has_zero_edges() {
        let src = SourceImage::new(RgbaImage::from_pixel(8, 8, Rgba([90, 90, 90, 255])));
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(edge_strength(&src, x as f32 + 0.5, y as f32 + 0.5), 0.0);
            }
        }
    }

    #[test]
    fn flat_neighborhood_cancels_at_any_level() {
        // Values whose luminance is not exactly representable in f32 must
        // still cancel to a bit-exact zero gradient.
        for v in [1u8, 37, 90, 137, 200, 254] {
            let src = SourceImage::new(RgbaImage::from_pixel(5, 5, Rgba([v, v, v, 255])));
            assert_eq!(edge_strength(&src, 2.5, 2.5).to_bits(), 0.0f32.to_bits());
        }
    }

    #[test]
    fn vertical_step_is_detected_and_clamped() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        for y in 0..8 {
            for x in 4..8 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let src = SourceImage::new(img);
        // On the step: |Gx| = 4 on a unit luminance jump → saturates the clamp.
        assert_eq!(edge_strength(&src, 4.0, 4.0), 1.0);
        // Far from the step: flat neighborhood.
        assert_eq!(edge_strength(&src, 1.0, 4.0), 0.0);
    }

    #[test]
    fn edge_strength_is_reproducible() {
        let mut img = RgbaImage::new(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let v = ((x * 37 + y * 11) % 256) as u8;
            *p = Rgba([v, v, v, 255]);
        }
        let src = SourceImage::new(img);
        let a = edge_strength(&src, 7.3, 9.8);
        let b = edge_strength(&src, 7.3, 9.8);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
