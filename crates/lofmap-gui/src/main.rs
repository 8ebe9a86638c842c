use anyhow::{Context, Result};
use eframe::egui;
use lofmap_core::figure::{title, FigureLayout, Rgb};
use lofmap_core::geom::{BBox2, Vec2};
use lofmap_core::model::CrossSection;
use lofmap_core::params::{BuildConfig, ParameterRecord, PARAM_SPECS};
use lofmap_core::report::SectionReport;
use std::path::{Path, PathBuf};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Melt Pool Cross-Section Map",
        native_options,
        Box::new(|cc| Ok(Box::new(LofMapApp::new(cc)))),
    )
}

struct LofMapApp {
    params: ParameterRecord,
    config: BuildConfig,
    layout: FigureLayout,

    section: CrossSection,
    /// Parameters `section` was computed from.
    computed_for: ParameterRecord,

    last_svg_path: Option<PathBuf>,

    zoom: f32,
    pan: egui::Vec2,

    status: String,
}

impl LofMapApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let params = ParameterRecord::default();
        let config = BuildConfig::default();
        let section = lofmap_algo::cross_section(&params, &config);
        let status = format!("{} polygon(s)", section.polygons.len());
        Self {
            params,
            config,
            layout: FigureLayout::default(),
            section,
            computed_for: params,
            last_svg_path: None,
            zoom: 1.0,
            pan: egui::Vec2::ZERO,
            status,
        }
    }

    fn recompute_if_changed(&mut self) {
        if self.params == self.computed_for {
            return;
        }
        if let Err(e) = self.params.validate() {
            self.status = format!("Invalid parameters: {e}");
            return;
        }
        self.section = lofmap_algo::cross_section(&self.params, &self.config);
        self.computed_for = self.params;

        let report = SectionReport::from_section(&self.section, &self.layout);
        self.status = match report.warnings.first() {
            Some(w) => format!("{} polygon(s); {}", report.polygons_total, w.message),
            None => format!("{} polygon(s)", report.polygons_total),
        };
    }

    fn export_svg(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("cross-section.svg")
            .save_file()
        else {
            return;
        };
        let result = lofmap_algo::svg_writer::write_svg(&self.section, &self.layout)
            .and_then(|svg| {
                std::fs::write(&path, svg).with_context(|| format!("write {}", path.display()))
            });
        match result {
            Ok(()) => {
                log::info!("exported {}", path.display());
                self.status = format!("Wrote SVG: {}", path.display());
                self.last_svg_path = Some(path);
            }
            Err(e) => self.status = format!("Failed to write SVG: {e:#}"),
        }
    }

    fn export_report(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("cross-section.report.json")
            .save_file()
        else {
            return;
        };
        let report = SectionReport::from_section(&self.section, &self.layout);
        match write_json(&path, &report) {
            Ok(()) => self.status = format!("Wrote report: {}", path.display()),
            Err(e) => self.status = format!("Failed to write report: {e:#}"),
        }
    }
}

impl eframe::App for LofMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("params").show(ctx, |ui| {
            ui.heading("Simulation Parameters");
            ui.separator();
            for spec in &PARAM_SPECS {
                ui.label(format!("{} ({})", spec.label, spec.unit));
                ui.add(
                    egui::DragValue::new(self.params.get_mut(spec.key))
                        .speed(spec.step)
                        .range(spec.min..=spec.max),
                );
            }
            ui.separator();
            if ui.button("Reset defaults").clicked() {
                self.params = ParameterRecord::default();
            }
        });

        self.recompute_if_changed();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Export SVG…").clicked() {
                    self.export_svg();
                }
                if ui.button("Export report…").clicked() {
                    self.export_report();
                }
                if ui.button("Reset view").clicked() {
                    self.zoom = 1.0;
                    self.pan = egui::Vec2::ZERO;
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if let Some(p) = &self.last_svg_path {
                    if ui.button("Open SVG").clicked() {
                        let _ = open::that(p);
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(title(&self.section.params));
            });
            ui.separator();
            draw_section(ui, self);
        });
    }
}

fn draw_section(ui: &mut egui::Ui, app: &mut LofMapApp) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());

    if response.dragged() {
        app.pan += response.drag_delta();
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.0 {
            let factor = (scroll / 200.0).exp();
            app.zoom = (app.zoom * factor).clamp(0.1, 30.0);
        }
    }

    let tx = WorldToScreen::new(rect, app.layout.viewport, app.pan, app.zoom);
    let axes = tx.bbox_to_rect(app.layout.viewport);
    let painter = ui.painter_at(rect.intersect(axes));

    painter.rect_filled(axes, egui::CornerRadius::same(0), egui::Color32::WHITE);

    let fill = color(app.layout.fill);
    let stroke = egui::Stroke::new(
        tx.length(app.layout.edge_width).max(0.5),
        color(app.layout.edge),
    );
    for poly in &app.section.polygons {
        let Some(c) = poly.centroid() else {
            continue;
        };
        let pts: Vec<egui::Pos2> = poly.points.iter().map(|p| tx.point(*p)).collect();
        painter.add(fan_mesh(tx.point(c), &pts, fill));
        painter.add(egui::Shape::closed_line(pts, stroke));
    }

    let bar = &app.layout.scale_bar;
    painter.line_segment(
        [tx.point(bar.start), tx.point(bar.end())],
        egui::Stroke::new(tx.length(bar.line_width), color(bar.color)),
    );
    painter.text(
        tx.point(bar.label_anchor()),
        egui::Align2::CENTER_BOTTOM,
        &bar.label,
        egui::FontId::proportional(tx.length(bar.font_size).clamp(6.0, 48.0)),
        color(bar.color),
    );

    ui.painter_at(rect).rect_stroke(
        axes,
        egui::CornerRadius::same(0),
        egui::Stroke::new(1.0, egui::Color32::BLACK),
        egui::StrokeKind::Outside,
    );
}

/// Triangle fan around `center`. Exact for polygons sorted by angle around that point.
fn fan_mesh(center: egui::Pos2, pts: &[egui::Pos2], fill: egui::Color32) -> egui::Shape {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, fill);
    for p in pts {
        mesh.colored_vertex(*p, fill);
    }
    let n = pts.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    egui::Shape::mesh(mesh)
}

fn color(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.0, c.1, c.2)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct WorldToScreen {
    rect: egui::Rect,
    center: Vec2,
    scale: f32,
    pan: egui::Vec2,
}

impl WorldToScreen {
    fn new(rect: egui::Rect, world: BBox2, pan: egui::Vec2, zoom: f32) -> Self {
        let center = world.center();
        let world_w = world.width().max(1e-6) as f32;
        let world_h = world.height().max(1e-6) as f32;
        let sx = rect.width() / world_w;
        let sy = rect.height() / world_h;
        let scale = (sx.min(sy) * 0.95).max(1e-3) * zoom;
        Self {
            rect,
            center,
            scale,
            pan,
        }
    }

    fn point(&self, p: Vec2) -> egui::Pos2 {
        let dx = (p.x - self.center.x) as f32;
        let dy = (p.y - self.center.y) as f32;
        let x = self.rect.center().x + self.pan.x + dx * self.scale;
        let y = self.rect.center().y + self.pan.y - dy * self.scale;
        egui::pos2(x, y)
    }

    /// Screen length of a world distance, so stroke widths zoom with the figure.
    fn length(&self, world: f64) -> f32 {
        world as f32 * self.scale
    }

    fn bbox_to_rect(&self, b: BBox2) -> egui::Rect {
        let p0 = self.point(b.min);
        let p1 = self.point(b.max);
        egui::Rect::from_min_max(
            egui::pos2(p0.x.min(p1.x), p0.y.min(p1.y)),
            egui::pos2(p0.x.max(p1.x), p0.y.max(p1.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_bar_keeps_proportions_under_zoom() {
        let layout = FigureLayout::default();
        let bar = &layout.scale_bar;
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));

        let ratios: Vec<f32> = [0.5, 1.0, 4.0]
            .into_iter()
            .map(|zoom| {
                let tx = WorldToScreen::new(rect, layout.viewport, egui::Vec2::ZERO, zoom);
                let span = tx.point(bar.end()).x - tx.point(bar.start).x;
                tx.length(bar.line_width) / span
            })
            .collect();

        let expected = (bar.line_width / bar.length) as f32;
        for r in ratios {
            assert!((r - expected).abs() < 1e-5, "ratio = {r}");
        }
    }

    #[test]
    fn edge_width_follows_zoom() {
        let layout = FigureLayout::default();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(500.0, 500.0));
        let near = WorldToScreen::new(rect, layout.viewport, egui::Vec2::ZERO, 2.0);
        let far = WorldToScreen::new(rect, layout.viewport, egui::Vec2::ZERO, 1.0);
        let w_near = near.length(layout.edge_width);
        let w_far = far.length(layout.edge_width);
        assert!((w_near - 2.0 * w_far).abs() < 1e-5);
    }
}
