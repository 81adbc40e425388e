// ============================================================================
// AUTO PRESET — piecewise-linear mapping from statistics to parameters
// ============================================================================
//
// Bands are gated on mean luminance (dark / mid / bright) and contrast.
// Every mapping is a clamped linear interpolation, so out-of-band statistics
// saturate at the band edges rather than extrapolating.

use super::analyze::AnalysisResult;
use super::RenderParams;

/// Mean luminance below which an image counts as "dark" for every band rule.
const DARK_CUT: f32 = 0.35;

/// Clamped linear range mapping: `v` is clamped into `[in_min, in_max]` and
/// mapped linearly onto `[out_min, out_max]` (which may be descending).
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (v.clamp(in_min, in_max) - in_min) / (in_max - in_min);
    out_min + (out_max - out_min) * t
}

/// Derive a full parameter set from image statistics. Overwrites all six
/// fields; the caller installs the result wholesale.
pub fn suggest_parameters(stats: &AnalysisResult) -> RenderParams {
    let mean = stats.mean_luminance;
    let std = stats.std_luminance;
    let dark = mean < DARK_CUT;

    let brightness = if dark {
        // Low-contrast dark images get the strongest lift.
        let contrast_factor = map_range(std, 0.1, 0.25, 1.0, 0.3);
        0.95 + 0.3 * contrast_factor
    } else if mean < 0.55 {
        map_range(mean, 0.35, 0.55, 0.95, 0.85)
    } else {
        map_range(mean, 0.55, 0.75, 0.85, 0.75)
    };

    let toon_threshold = map_range(std, 0.1, 0.25, 0.24, 0.28);

    let final_threshold = if dark {
        map_range(mean, 0.15, 0.35, 0.25, 0.32)
    } else {
        map_range(mean, 0.35, 0.6, 0.34, 0.30)
    };

    let edge_strength = if dark {
        1.0
    } else {
        map_range(stats.texture_complexity, 0.4, 0.8, 1.15, 1.0)
    };

    let hatch_amount = if dark {
        map_range(mean, 0.15, 0.35, 0.75, 0.90)
    } else {
        1.0
    };

    RenderParams {
        brightness,
        hatch_scale: 2.0,
        hatch_amount,
        edge_strength,
        toon_threshold,
        final_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: f32, std: f32, edges: f32, texture: f32) -> AnalysisResult {
        AnalysisResult {
            mean_luminance: mean,
            std_luminance: std,
            edge_density: edges,
            texture_complexity: texture,
        }
    }

    #[test]
    fn map_range_clamps_and_descends() {
        assert!((map_range(0.0, 0.1, 0.25, 1.0, 0.3) - 1.0).abs() < 1e-6);
        assert!((map_range(1.0, 0.1, 0.25, 1.0, 0.3) - 0.3).abs() < 1e-6);
        assert!((map_range(0.175, 0.1, 0.25, 1.0, 0.3) - 0.65).abs() < 1e-5);
        // Ascending output works the same way.
        assert!((map_range(0.5, 0.0, 1.0, 0.24, 0.28) - 0.26).abs() < 1e-5);
    }

    #[test]
    fn dark_image_band() {
        let p = suggest_parameters(&stats(0.2, 0.1, 0.3, 0.5));
        // contrast_factor saturates at 1.0 for std ≤ 0.1 → brightness 1.25.
        assert!((p.brightness - 1.25).abs() < 1e-5);
        assert_eq!(p.edge_strength, 1.0);
        // hatching from meanLum 0.2 ∈ [0.15, 0.35] → [0.75, 0.90].
        assert!((p.hatch_amount - 0.7875).abs() < 1e-4);
        // threshold from meanLum 0.2 → 0.25 + 0.07·0.25.
        assert!((p.final_threshold - 0.2675).abs() < 1e-4);
        assert_eq!(p.hatch_scale, 2.0);
    }

    #[test]
    fn mid_band_interpolates_brightness() {
        let p = suggest_parameters(&stats(0.45, 0.15, 0.2, 0.6));
        assert!((p.brightness - 0.90).abs() < 1e-5);
        assert_eq!(p.hatch_amount, 1.0);
        // edges from texture 0.6 ∈ [0.4, 0.8] → [1.15, 1.0].
        assert!((p.edge_strength - 1.075).abs() < 1e-4);
    }

    #[test]
    fn bright_band_lowers_brightness() {
        let p = suggest_parameters(&stats(0.75, 0.2, 0.2, 0.9));
        assert!((p.brightness - 0.75).abs() < 1e-5);
        // texture saturates the band → edges settle at 1.0.
        assert!((p.edge_strength - 1.0).abs() < 1e-5);
        // threshold descends over meanLum [0.35, 0.6] → saturated at 0.30.
        assert!((p.final_threshold - 0.30).abs() < 1e-5);
    }

    #[test]
    fn toon_follows_contrast() {
        let low = suggest_parameters(&stats(0.5, 0.05, 0.2, 0.5));
        let high = suggest_parameters(&stats(0.5, 0.3, 0.2, 0.5));
        assert!((low.toon_threshold - 0.24).abs() < 1e-5);
        assert!((high.toon_threshold - 0.28).abs() < 1e-5);
    }
}
