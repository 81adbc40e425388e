// ============================================================================
// ZONES & HATCH — tonal classification and crosshatch compositing
// ============================================================================
//
// Each sampled pixel lands in one of three tonal zones:
//   SHADOW    → solid black
//   HIGHLIGHT → solid white
//   MIDTONE   → thresholded against the tiled hatch texture
// An inked-outline mask derived from the Sobel edge strength is then applied
// multiplicatively in every zone.

use image::RgbaImage;

use super::sampler::luma;

/// Offset separating the shadow cut from the toon threshold slider.
const SHADOW_OFFSET: f32 = 0.05;

/// Tonal zone of one pixel. Midtones carry their continuous position within
/// the zone, 0 at the shadow cut and 1 at the highlight cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Shadow,
    Midtone(f32),
    Highlight,
}

/// Classify a raw luminance sample.
///
/// `shadow = toon_threshold + 0.05` and `highlight = 1 − final_threshold`.
/// The comparisons run in order (shadow first, then highlight), so extreme
/// settings that invert the cuts still classify every pixel deterministically;
/// the midtone division is guarded and a non-positive span snaps to 0.
pub fn classify(
    lum0: f32,
    brightness: f32,
    toon_threshold: f32,
    final_threshold: f32,
) -> Zone {
    let lum = (lum0 * brightness).clamp(0.0, 1.0);
    let shadow = toon_threshold + SHADOW_OFFSET;
    let highlight = 1.0 - final_threshold;

    if lum < shadow {
        Zone::Shadow
    } else if lum > highlight {
        Zone::Highlight
    } else {
        let span = highlight - shadow;
        let pos = if span > f32::EPSILON {
            ((lum - shadow) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Zone::Midtone(pos)
    }
}

/// Midtone intensity: a hard 50% cut blended toward the hatch-textured cut by
/// `hatch_amount`. The lerp is kept continuous — fractional amounts produce
/// gray rather than being re-thresholded.
pub fn hatch_blend(mid_pos: f32, hatch_value: f32, hatch_amount: f32) -> f32 {
    let pure = if mid_pos >= 0.5 { 1.0 } else { 0.0 };
    let textured = if hatch_value + mid_pos >= 0.5 { 1.0 } else { 0.0 };
    pure + (textured - pure) * hatch_amount
}

/// Outline mask from a raw edge strength: 1 leaves the pixel alone, 0 forces
/// it black. Only edges strong enough that `edge_raw·edge_strength·0.85`
/// pushes the term below 0.15 produce outline pixels.
pub fn edge_mask(edge_raw: f32, edge_strength: f32) -> f32 {
    if 1.0 - edge_raw * edge_strength * 0.85 >= 0.15 {
        1.0
    } else {
        0.0
    }
}

/// Resolved intensity of a zone before the edge overlay.
pub fn zone_intensity(zone: Zone, hatch_value: f32, hatch_amount: f32) -> f32 {
    match zone {
        Zone::Shadow => 0.0,
        Zone::Highlight => 1.0,
        Zone::Midtone(pos) => hatch_blend(pos, hatch_value, hatch_amount),
    }
}

// ============================================================================
// Hatch texture
// ============================================================================

/// The bundled crosshatch tile, reduced to a luminance grid at load time.
/// Shared read-only across every frame; tiling is modulo-wrap in both axes.
pub struct HatchTexture {
    width: u32,
    height: u32,
    luma: Vec<f32>,
}

impl HatchTexture {
    pub fn from_image(img: &RgbaImage) -> Self {
        let luma: Vec<f32> = img
            .pixels()
            .map(|p| {
                luma([
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                ])
            })
            .collect();
        Self {
            width: img.width(),
            height: img.height(),
            luma,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the tile at a UV coordinate in tile units. Values outside
    /// [0, 1) wrap, so the pattern repeats seamlessly in both axes.
    pub fn sample_wrapped(&self, u: f32, v: f32) -> f32 {
        let fu = u.rem_euclid(1.0);
        let fv = v.rem_euclid(1.0);
        let x = ((fu * self.width as f32) as u32).min(self.width - 1);
        let y = ((fv * self.height as f32) as u32).min(self.height - 1);
        self.luma[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn classify_default_parameters_matches_reference_examples() {
        // Defaults: brightness 1, toon 0.5, threshold 0.3
        // → shadow cut 0.55, highlight cut 0.7.
        assert_eq!(classify(0.5, 1.0, 0.5, 0.3), Zone::Shadow);
        assert_eq!(classify(0.95, 1.0, 0.5, 0.3), Zone::Highlight);
        match classify(0.6, 1.0, 0.5, 0.3) {
            Zone::Midtone(pos) => assert!((pos - (0.6 - 0.55) / 0.15).abs() < 1e-5),
            z => panic!("expected midtone, got {:?}", z),
        }
    }

    #[test]
    fn zones_are_monotone_in_adjusted_luminance() {
        let rank = |z: Zone| match z {
            Zone::Shadow => 0,
            Zone::Midtone(_) => 1,
            Zone::Highlight => 2,
        };
        let mut prev = 0;
        for i in 0..=1000 {
            let lum = i as f32 / 1000.0;
            let r = rank(classify(lum, 1.0, 0.3, 0.3));
            assert!(r >= prev, "zone order regressed at lum {}", lum);
            prev = r;
        }
    }

    #[test]
    fn inverted_thresholds_stay_total_and_deterministic() {
        // toon 0.9 → shadow cut 0.95; threshold 0.9 → highlight cut 0.1.
        for i in 0..=100 {
            let lum = i as f32 / 100.0;
            let z = classify(lum, 1.0, 0.9, 0.9);
            if lum < 0.949 {
                assert_eq!(z, Zone::Shadow);
            } else if lum > 0.951 {
                assert_eq!(z, Zone::Highlight);
            } else {
                // Exactly on the cut: either non-midtone branch is acceptable,
                // it just has to be one of them.
                assert!(z == Zone::Shadow || z == Zone::Highlight);
            }
        }
    }

    #[test]
    fn hatch_amount_boundaries() {
        // amount 0 → pure cut, independent of the hatch sample.
        for hv in [0.0, 0.3, 0.9] {
            assert_eq!(hatch_blend(0.6, hv, 0.0), 1.0);
            assert_eq!(hatch_blend(0.4, hv, 0.0), 0.0);
        }
        // amount 1 → textured cut.
        assert_eq!(hatch_blend(0.1, 0.45, 1.0), 1.0);
        assert_eq!(hatch_blend(0.1, 0.3, 1.0), 0.0);
    }

    #[test]
    fn edge_mask_threshold_rule() {
        assert_eq!(edge_mask(0.0, 2.0), 1.0);
        // edge_raw·strength ≥ 1.0 drives the mask to zero.
        assert_eq!(edge_mask(1.0, 1.1), 0.0);
        assert_eq!(edge_mask(0.5, 1.0), 1.0);
    }

    #[test]
    fn hatch_sampling_wraps_both_axes() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 2, Rgba([0, 0, 0, 255]));
        let tile = HatchTexture::from_image(&img);
        let inside = tile.sample_wrapped(0.3, 0.6);
        assert_eq!(inside, tile.sample_wrapped(1.3, 0.6));
        assert_eq!(inside, tile.sample_wrapped(0.3, -0.4));
        assert_eq!(inside, tile.sample_wrapped(-1.7, 2.6));
        assert!(inside < 0.1);
    }
}
