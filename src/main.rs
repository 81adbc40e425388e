use eframe::egui;

use inkhatch::app::InkhatchApp;
use inkhatch::{assets, cli, logger};

fn main() -> Result<(), eframe::Error> {
    // -- CLI / headless mode ------------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        let args = cli::CliArgs::parse();
        std::process::exit(cli::run(args));
    }

    // -- GUI mode -----------------------------------------------------------

    // Session log (overwrites the previous session's file).
    logger::init();

    // The hatch tile is a hard dependency of the pipeline: refuse to start
    // without it.
    let hatch = match assets::load_hatch_texture() {
        Ok(h) => h,
        Err(e) => {
            inkhatch::log_err!("startup: {}", e);
            eprintln!("fatal: {}", e);
            std::process::exit(1);
        }
    };

    let icon = assets::load_app_icon();

    let options = eframe::NativeOptions {
        viewport: {
            let mut vp = egui::ViewportBuilder::default()
                .with_inner_size([1180.0, 760.0])
                .with_title("inkhatch");
            if let Some(img) = icon {
                let (w, h) = img.dimensions();
                vp = vp.with_icon(std::sync::Arc::new(egui::viewport::IconData {
                    rgba: img.into_raw(),
                    width: w,
                    height: h,
                }));
            }
            vp
        },
        ..Default::default()
    };

    eframe::run_native(
        "inkhatch",
        options,
        Box::new(move |cc| Box::new(InkhatchApp::new(cc, hatch))),
    )
}
