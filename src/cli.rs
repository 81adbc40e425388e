// ============================================================================
// inkhatch CLI — headless rendering via command-line arguments
// ============================================================================
//
// Usage examples:
//   inkhatch --input photo.jpg --output out.png
//   inkhatch -i photo.jpg -o out.png --auto
//   inkhatch -i photo.jpg -o out.png --brightness 1.1 --hatching 0.8
//
// No window is opened in CLI mode. The render runs at full source
// resolution, 1:1 and centered — the same invocation the GUI export uses.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use crate::assets::load_hatch_texture;
use crate::io::{load_image, write_png};
use crate::pipeline::analyze::analyze;
use crate::pipeline::auto::suggest_parameters;
use crate::pipeline::sampler::SourceImage;
use crate::pipeline::{render_export, RenderParams};

/// inkhatch headless renderer.
///
/// Convert a photograph into a black-and-white comic/crosshatch PNG without
/// opening the GUI.
#[derive(Parser, Debug)]
#[command(
    name = "inkhatch",
    about = "inkhatch headless comic/crosshatch renderer",
    long_about = "Render a photo to a black-and-white crosshatch illustration\n\
                  without opening the GUI.\n\n\
                  Example:\n  \
                  inkhatch --input photo.jpg --output out.png --auto\n  \
                  inkhatch -i photo.jpg -o out.png --toon 0.4 --edges 1.2"
)]
pub struct CliArgs {
    /// Input photograph (png, jpg, webp, bmp, tga, tiff).
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Output PNG path.
    #[arg(short, long, required = true, value_name = "FILE.png")]
    pub output: PathBuf,

    /// Derive all six parameters from image statistics before applying any
    /// explicit overrides below.
    #[arg(long)]
    pub auto: bool,

    /// Luminance multiplier applied before zone classification.
    #[arg(long, value_name = "0.3-1.3")]
    pub brightness: Option<f32>,

    /// Hatch tile density.
    #[arg(long, value_name = "1-10")]
    pub hatch_scale: Option<f32>,

    /// Blend between a hard midtone cut (0) and the hatch texture (1).
    #[arg(long, value_name = "0-1")]
    pub hatching: Option<f32>,

    /// Outline strength multiplier.
    #[arg(long, value_name = "0-2")]
    pub edges: Option<f32>,

    /// Toon threshold (shadow cut sits 0.05 above it).
    #[arg(long, value_name = "0-1")]
    pub toon: Option<f32>,

    /// Final threshold (highlight cut is 1 minus this).
    #[arg(long, value_name = "0-1")]
    pub threshold: Option<f32>,

    /// Print statistics and timing to stdout.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// True when a CLI-mode flag is present in the real process arguments.
    /// Used by `main()` to route before creating an eframe window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

/// Run one headless render and return an OS exit code
/// (0 = success, 1 = failure).
pub fn run(args: CliArgs) -> i32 {
    let started = Instant::now();

    let hatch = match load_hatch_texture() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return 1;
        }
    };

    let source = match load_image(&args.input) {
        Ok(img) => SourceImage::new(img),
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    let mut params = if args.auto {
        let stats = analyze(&source);
        if args.verbose {
            println!(
                "analysis: mean {:.3}  std {:.3}  edges {:.3}  texture {:.3}",
                stats.mean_luminance,
                stats.std_luminance,
                stats.edge_density,
                stats.texture_complexity
            );
        }
        suggest_parameters(&stats)
    } else {
        RenderParams::default()
    };

    // Explicit flags win over both defaults and --auto.
    if let Some(v) = args.brightness {
        params.brightness = v;
    }
    if let Some(v) = args.hatch_scale {
        params.hatch_scale = v;
    }
    if let Some(v) = args.hatching {
        params.hatch_amount = v;
    }
    if let Some(v) = args.edges {
        params.edge_strength = v;
    }
    if let Some(v) = args.toon {
        params.toon_threshold = v;
    }
    if let Some(v) = args.threshold {
        params.final_threshold = v;
    }

    let rendered = render_export(&source, &hatch, params);
    if let Err(e) = write_png(&args.output, &rendered) {
        eprintln!("error: {}", e);
        return 1;
    }

    if args.verbose {
        println!(
            "{} → {} ({}×{}) in {:.2}s",
            args.input.display(),
            args.output.display(),
            rendered.width(),
            rendered.height(),
            started.elapsed().as_secs_f32()
        );
    }
    0
}
