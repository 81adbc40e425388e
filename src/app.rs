// ============================================================================
// APPLICATION SHELL — menus, parameter panel, pan/zoom canvas
// ============================================================================
//
// The preview is cached in a texture and only re-rendered when a snapshot of
// everything the pipeline reads (source generation, view transform,
// parameters, mode, viewport size) differs from the previous frame. Pan,
// zoom and slider drags invalidate the snapshot; idle frames reuse the
// texture untouched.

use std::path::PathBuf;

use eframe::egui;
use egui::{Color32, Pos2, Rect, TextureHandle, Vec2};

use crate::io;
use crate::pipeline::analyze::{analyze, AnalysisResult};
use crate::pipeline::auto::suggest_parameters;
use crate::pipeline::sampler::SourceImage;
use crate::pipeline::zones::HatchTexture;
use crate::pipeline::{render, render_export, RenderJob, RenderMode, RenderParams};
use crate::view::ViewTransform;
use crate::{log_err, log_info};

/// Everything the preview render reads. Compared by value each frame; a
/// changed snapshot triggers exactly one re-render.
#[derive(Clone, Copy, PartialEq)]
struct PreviewStamp {
    generation: u64,
    view: ViewTransform,
    params: RenderParams,
    mode: RenderMode,
    out_w: u32,
    out_h: u32,
}

pub struct InkhatchApp {
    hatch: HatchTexture,

    source: Option<SourceImage>,
    source_path: Option<PathBuf>,
    /// Bumped whenever the source image is replaced; part of the stamp.
    source_generation: u64,

    view: ViewTransform,
    params: RenderParams,
    /// When true the canvas shows the untouched photo through the same view.
    compare: bool,

    last_analysis: Option<AnalysisResult>,

    preview: Option<TextureHandle>,
    last_stamp: Option<PreviewStamp>,
    /// Most recent canvas size in pixels, for Fit outside the canvas closure.
    canvas_size: Vec2,
    /// Fit the view on the next frame (set on open, resolved once the
    /// canvas size is known).
    fit_requested: bool,

    status: String,
}

impl InkhatchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, hatch: HatchTexture) -> Self {
        Self {
            hatch,
            source: None,
            source_path: None,
            source_generation: 0,
            view: ViewTransform::centered(0, 0),
            params: RenderParams::default(),
            compare: false,
            last_analysis: None,
            preview: None,
            last_stamp: None,
            canvas_size: Vec2::new(800.0, 600.0),
            fit_requested: false,
            status: "Open a photo to begin (File → Open…)".to_string(),
        }
    }

    // -- Commands ----------------------------------------------------------

    fn open_image(&mut self) {
        let Some(path) = io::pick_open_path() else {
            return; // dialog cancelled
        };
        match io::load_image(&path) {
            Ok(img) => {
                let (w, h) = img.dimensions();
                self.source = Some(SourceImage::new(img));
                self.source_path = Some(path.clone());
                self.source_generation += 1;
                self.last_analysis = None;
                self.fit_requested = true;
                self.status = format!("{} — {}×{}", path.display(), w, h);
                log_info!("opened {} ({}x{})", path.display(), w, h);
            }
            Err(e) => {
                // Recoverable: keep whatever was loaded before.
                self.status = format!("Load failed: {}", e);
                log_err!("{}", e);
            }
        }
    }

    fn export_png(&mut self) {
        let Some(source) = &self.source else {
            self.status = "Nothing to export — open a photo first".to_string();
            return;
        };
        let Some(path) = io::pick_export_path(self.source_path.as_deref()) else {
            return; // dialog cancelled, silent
        };
        let rendered = render_export(source, &self.hatch, self.params);
        match io::write_png(&path, &rendered) {
            Ok(()) => {
                self.status = format!("Exported {}", path.display());
                log_info!("exported {}", path.display());
            }
            Err(e) => {
                self.status = format!("Export failed: {}", e);
                log_err!("{}", e);
            }
        }
    }

    fn auto_parameters(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let stats = analyze(source);
        // Written wholesale, exactly once.
        self.params = suggest_parameters(&stats);
        self.last_analysis = Some(stats);
        self.status = format!(
            "Auto: mean {:.2}, contrast {:.2}, edges {:.2}, texture {:.2}",
            stats.mean_luminance, stats.std_luminance, stats.edge_density, stats.texture_complexity
        );
        log_info!(
            "auto preset from mean {:.3} std {:.3} edges {:.3} texture {:.3}",
            stats.mean_luminance,
            stats.std_luminance,
            stats.edge_density,
            stats.texture_complexity
        );
    }

    fn fit_to_view(&mut self) {
        if let Some(source) = &self.source {
            self.view = ViewTransform::fit(
                source.width(),
                source.height(),
                self.canvas_size.x,
                self.canvas_size.y,
            );
        }
    }

    fn one_to_one(&mut self) {
        if let Some(source) = &self.source {
            self.view = ViewTransform::centered(source.width(), source.height());
        }
    }

    // -- Preview -----------------------------------------------------------

    /// Re-render the preview texture if anything it depends on changed.
    fn refresh_preview(&mut self, ctx: &egui::Context, out_w: u32, out_h: u32) {
        let Some(source) = &self.source else {
            return;
        };
        let mode = if self.compare {
            RenderMode::Original
        } else {
            RenderMode::Effect
        };
        let stamp = PreviewStamp {
            generation: self.source_generation,
            view: self.view,
            params: self.params,
            mode,
            out_w,
            out_h,
        };
        if self.last_stamp == Some(stamp) {
            return;
        }

        let rendered = render(&RenderJob {
            source,
            hatch: &self.hatch,
            view: self.view,
            params: self.params,
            mode,
            out_width: out_w,
            out_height: out_h,
        });
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [out_w as usize, out_h as usize],
            rendered.as_raw(),
        );
        match &mut self.preview {
            Some(tex) => tex.set(color_image, egui::TextureOptions::NEAREST),
            None => {
                self.preview =
                    Some(ctx.load_texture("preview", color_image, egui::TextureOptions::NEAREST));
            }
        }
        self.last_stamp = Some(stamp);
    }

    // -- UI sections -------------------------------------------------------

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open…").clicked() {
                    self.open_image();
                    ui.close_menu();
                }
                if ui.button("Export PNG…").clicked() {
                    self.export_png();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button("View", |ui| {
                if ui.button("Fit to view").clicked() {
                    self.fit_to_view();
                    ui.close_menu();
                }
                if ui.button("1:1").clicked() {
                    self.one_to_one();
                    ui.close_menu();
                }
                ui.separator();
                ui.checkbox(&mut self.compare, "Compare (show original)");
            });
            ui.menu_button("Image", |ui| {
                if ui.button("Auto parameters").clicked() {
                    self.auto_parameters();
                    ui.close_menu();
                }
                if ui.button("Reset parameters").clicked() {
                    self.params = RenderParams::default();
                    ui.close_menu();
                }
            });
        });
    }

    fn parameter_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Parameters");
        ui.separator();

        ui.add(egui::Slider::new(&mut self.params.brightness, 0.3..=1.3).text("Brightness"));
        ui.add(egui::Slider::new(&mut self.params.hatch_scale, 1.0..=10.0).text("Hatch scale"));
        ui.add(egui::Slider::new(&mut self.params.hatch_amount, 0.0..=1.0).text("Hatching"));
        ui.add(egui::Slider::new(&mut self.params.edge_strength, 0.0..=2.0).text("Edges"));
        ui.add(egui::Slider::new(&mut self.params.toon_threshold, 0.0..=1.0).text("Toon"));
        ui.add(egui::Slider::new(&mut self.params.final_threshold, 0.0..=1.0).text("Threshold"));

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Auto").clicked() {
                self.auto_parameters();
            }
            if ui.button("Reset").clicked() {
                self.params = RenderParams::default();
            }
        });
        ui.toggle_value(&mut self.compare, "Compare");

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Fit").clicked() {
                self.fit_to_view();
            }
            if ui.button("1:1").clicked() {
                self.one_to_one();
            }
        });

        if let Some(stats) = &self.last_analysis {
            ui.separator();
            ui.label("Last analysis");
            ui.monospace(format!("mean lum  {:.3}", stats.mean_luminance));
            ui.monospace(format!("std lum   {:.3}", stats.std_luminance));
            ui.monospace(format!("edges     {:.3}", stats.edge_density));
            ui.monospace(format!("texture   {:.3}", stats.texture_complexity));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas_size = rect.size();

        if self.fit_requested {
            self.fit_to_view();
            self.fit_requested = false;
        }

        if self.source.is_none() {
            ui.painter().rect_filled(rect, 0.0, Color32::from_gray(34));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No image loaded",
                egui::FontId::proportional(18.0),
                Color32::from_gray(140),
            );
            return;
        }

        // Drag to pan.
        if response.dragged() {
            let delta = response.drag_delta();
            self.view.pan_by(delta.x, delta.y);
        }

        // Scroll wheel zooms about the hovered point.
        if response.hovered() {
            let scroll = ui.ctx().input(|i| i.scroll_delta.y);
            if scroll != 0.0 {
                let factor = 1.0 + scroll * 0.005;
                let anchor = ui
                    .ctx()
                    .input(|i| i.pointer.hover_pos())
                    .unwrap_or_else(|| rect.center());
                self.view.zoom_about(
                    factor,
                    anchor.x - rect.min.x,
                    anchor.y - rect.min.y,
                    rect.width(),
                    rect.height(),
                );
            }
        }

        let out_w = rect.width().round().max(1.0) as u32;
        let out_h = rect.height().round().max(1.0) as u32;
        self.refresh_preview(ui.ctx(), out_w, out_h);

        if let Some(tex) = &self.preview {
            ui.painter().image(
                tex.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{:.0}%", self.view.zoom * 100.0));
                if let Some(source) = &self.source {
                    ui.label(format!("{}×{}", source.width(), source.height()));
                }
            });
        });
    }
}

impl eframe::App for InkhatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keyboard shortcuts.
        let (open, export) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::O),
                i.modifiers.command && i.key_pressed(egui::Key::E),
            )
        });
        if open {
            self.open_image();
        }
        if export {
            self.export_png();
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_bar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::SidePanel::right("parameters")
            .default_width(230.0)
            .show(ctx, |ui| self.parameter_panel(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(34)))
            .show(ctx, |ui| self.canvas(ui));
    }
}
