// ============================================================================
// RENDER PIPELINE — photo → black-and-white comic/crosshatch illustration
// ============================================================================
//
// Per output pixel: map through the view transform, bilinear-sample the
// photo, classify the brightness-adjusted luminance into a tonal zone, blend
// the tiled hatch texture into midtones, then multiply in the Sobel outline
// mask. Every pixel is independent, so rows run in parallel and the result
// is identical at any thread count.
//
// The same entry point renders the interactive preview (viewport-sized,
// arbitrary view transform) and the export (full resolution, 1:1 centered).

pub mod analyze;
pub mod auto;
pub mod edge;
pub mod sampler;
pub mod zones;

use image::RgbaImage;
use rayon::prelude::*;

use crate::view::ViewTransform;
use self::edge::edge_strength;
use self::sampler::{luma, SourceImage, BACKGROUND};
use self::zones::{classify, edge_mask, zone_intensity, HatchTexture};

/// Output height at which `hatch_scale` means "tiles across the output".
/// Compatibility constant: densities were tuned against an 800px preview.
pub const HATCH_REF_HEIGHT: f32 = 800.0;

/// The six user-visible parameters, read every frame by the pipeline and
/// overwritten wholesale by the auto preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub brightness: f32,
    pub hatch_scale: f32,
    pub hatch_amount: f32,
    pub edge_strength: f32,
    pub toon_threshold: f32,
    pub final_threshold: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            hatch_scale: 2.0,
            hatch_amount: 1.0,
            edge_strength: 1.0,
            toon_threshold: 0.5,
            final_threshold: 0.3,
        }
    }
}

/// Which renderer variant to run. Both share the sampler, so the compare
/// view and the effect view pan and zoom identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The full comic/crosshatch transform.
    Effect,
    /// Untouched photo through the same view transform (compare).
    Original,
}

/// One render invocation: all inputs, no hidden state.
pub struct RenderJob<'a> {
    pub source: &'a SourceImage,
    pub hatch: &'a HatchTexture,
    pub view: ViewTransform,
    pub params: RenderParams,
    pub mode: RenderMode,
    pub out_width: u32,
    pub out_height: u32,
}

/// Render a job into a fresh RGBA buffer (row-major, top-to-bottom).
pub fn render(job: &RenderJob) -> RgbaImage {
    let w = job.out_width as usize;
    let h = job.out_height as usize;
    if w == 0 || h == 0 {
        return RgbaImage::new(job.out_width, job.out_height);
    }

    let out_w = w as f32;
    let out_h = h as f32;
    // Hatch density: tile count across the output, normalized to the
    // reference height so the pattern keeps its on-screen weight.
    let hatch_tiles = job.params.hatch_scale * (out_h / HATCH_REF_HEIGHT);

    let stride = w * 4;
    let mut raw = vec![0u8; w * h * 4];

    raw.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        let oy = y as f32 + 0.5;
        for x in 0..w {
            let ox = x as f32 + 0.5;
            let (sx, sy) = job.view.output_to_source(ox, oy, out_w, out_h);

            let pi = x * 4;
            if !job.source.contains(sx, sy) {
                row[pi..pi + 4].copy_from_slice(&BACKGROUND);
                continue;
            }

            let rgb = job.source.sample_bilinear(sx, sy);
            match job.mode {
                RenderMode::Original => {
                    row[pi] = (rgb[0] * 255.0).round() as u8;
                    row[pi + 1] = (rgb[1] * 255.0).round() as u8;
                    row[pi + 2] = (rgb[2] * 255.0).round() as u8;
                    row[pi + 3] = 255;
                }
                RenderMode::Effect => {
                    let zone = classify(
                        luma(rgb),
                        job.params.brightness,
                        job.params.toon_threshold,
                        job.params.final_threshold,
                    );
                    let hatch_value = job
                        .hatch
                        .sample_wrapped(ox / out_w * hatch_tiles, oy / out_h * hatch_tiles);
                    let intensity = zone_intensity(zone, hatch_value, job.params.hatch_amount);

                    let edge_raw = edge_strength(job.source, sx, sy);
                    let masked = intensity * edge_mask(edge_raw, job.params.edge_strength);

                    let v = (masked * 255.0).round().clamp(0.0, 255.0) as u8;
                    row[pi] = v;
                    row[pi + 1] = v;
                    row[pi + 2] = v;
                    row[pi + 3] = 255;
                }
            }
        }
    });

    RgbaImage::from_raw(job.out_width, job.out_height, raw).unwrap()
}

/// Full-resolution effect render for export: 1:1, centered, output size equal
/// to the source size.
pub fn render_export(
    source: &SourceImage,
    hatch: &HatchTexture,
    params: RenderParams,
) -> RgbaImage {
    render(&RenderJob {
        source,
        hatch,
        view: ViewTransform::centered(source.width(), source.height()),
        params,
        mode: RenderMode::Effect,
        out_width: source.width(),
        out_height: source.height(),
    })
}
