// ============================================================================
// IMAGE ANALYZER — whole-image statistics on a fixed downsampled grid
// ============================================================================
//
// Everything here runs on a 64×64 filtered downsample of the source so the
// statistics are independent of the photo's resolution. One-shot batch job:
// runs to completion, returns a value, keeps no state.

use image::imageops::{self, FilterType};

use super::sampler::{luma, SourceImage};

/// Side length of the analysis grid.
pub const ANALYSIS_GRID: u32 = 64;
/// Side length of the texture-complexity blocks (the grid splits into an
/// 8×8 arrangement of 8×8-pixel blocks).
const BLOCK: u32 = 8;
/// Mean gradient magnitude → edge density scale.
const EDGE_DENSITY_SCALE: f32 = 5.0;
/// Mean block variance → texture complexity scale.
const TEXTURE_SCALE: f32 = 20.0;

/// Global statistics of one source image, consumed by the parameter mapper
/// and then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub mean_luminance: f32,
    pub std_luminance: f32,
    pub edge_density: f32,
    pub texture_complexity: f32,
}

/// Compute [`AnalysisResult`] for a source image. Deterministic pure function.
pub fn analyze(src: &SourceImage) -> AnalysisResult {
    let small = imageops::resize(src.image(), ANALYSIS_GRID, ANALYSIS_GRID, FilterType::Triangle);
    let n = (ANALYSIS_GRID * ANALYSIS_GRID) as usize;

    let lum: Vec<f32> = small
        .pixels()
        .map(|p| {
            luma([
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
            ])
        })
        .collect();

    // Mean and standard deviation from sum / sum-of-squares.
    let mut sum = 0.0f32;
    let mut sum_sq = 0.0f32;
    for &l in &lum {
        sum += l;
        sum_sq += l * l;
    }
    let mean = sum / n as f32;
    let std = (sum_sq / n as f32 - mean * mean).max(0.0).sqrt();

    AnalysisResult {
        mean_luminance: mean,
        std_luminance: std,
        edge_density: edge_density(&lum),
        texture_complexity: texture_complexity(&lum),
    }
}

/// Mean central-difference gradient magnitude over interior grid pixels
/// (the 1-pixel border is excluded), scaled and clamped to [0, 1].
fn edge_density(lum: &[f32]) -> f32 {
    let g = ANALYSIS_GRID as usize;
    let mut total = 0.0f32;
    for y in 1..g - 1 {
        for x in 1..g - 1 {
            let gx = lum[y * g + x + 1] - lum[y * g + x - 1];
            let gy = lum[(y + 1) * g + x] - lum[(y - 1) * g + x];
            total += (gx * gx + gy * gy).sqrt();
        }
    }
    let interior = ((g - 2) * (g - 2)) as f32;
    (total / interior * EDGE_DENSITY_SCALE).clamp(0.0, 1.0)
}

/// Mean per-block luminance variance over non-overlapping 8×8 blocks,
/// scaled and clamped to [0, 1].
fn texture_complexity(lum: &[f32]) -> f32 {
    let g = ANALYSIS_GRID as usize;
    let b = BLOCK as usize;
    let blocks_per_side = g / b;
    let mut var_total = 0.0f32;
    for by in 0..blocks_per_side {
        for bx in 0..blocks_per_side {
            let mut sum = 0.0f32;
            let mut sum_sq = 0.0f32;
            for y in 0..b {
                for x in 0..b {
                    let l = lum[(by * b + y) * g + bx * b + x];
                    sum += l;
                    sum_sq += l * l;
                }
            }
            let n = (b * b) as f32;
            let mean = sum / n;
            var_total += (sum_sq / n - mean * mean).max(0.0);
        }
    }
    let block_count = (blocks_per_side * blocks_per_side) as f32;
    (var_total / block_count * TEXTURE_SCALE).clamp(0.0, 1.0)
}
