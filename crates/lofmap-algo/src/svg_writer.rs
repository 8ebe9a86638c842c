use anyhow::Result;
use lofmap_core::figure::{title, FigureLayout};
use lofmap_core::geom::Vec2;
use lofmap_core::model::CrossSection;
use std::fmt::Write;

const MARGIN: f64 = 20.0;
const TITLE_BAND: f64 = 30.0;
const TITLE_FONT_SIZE: f64 = 8.0;
/// Output pixels per µm.
const PX_PER_UNIT: f64 = 1.6;

/// Maps section coordinates (z up) into SVG user space (y down).
struct Frame {
    min_x: f64,
    max_y: f64,
}

impl Frame {
    fn point(&self, p: Vec2) -> (f64, f64) {
        (
            MARGIN + (p.x - self.min_x),
            TITLE_BAND + MARGIN + (self.max_y - p.y),
        )
    }
}

pub fn write_svg(section: &CrossSection, layout: &FigureLayout) -> Result<String> {
    let vp = layout.viewport;
    let frame = Frame {
        min_x: vp.min.x,
        max_y: vp.max.y,
    };
    let view_w = vp.width() + 2.0 * MARGIN;
    let view_h = vp.height() + TITLE_BAND + 2.0 * MARGIN;
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");

    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {} {}">"#,
        view_w * PX_PER_UNIT,
        view_h * PX_PER_UNIT,
        view_w,
        view_h
    )?;
    writeln!(
        out,
        "<desc>Melt-pool cross-section, {} polygon(s) of {} track(s), generated {}</desc>",
        section.polygons.len(),
        section.tracks_total,
        timestamp
    )?;

    // Axes window; polygons are clipped to it like a plot with fixed limits.
    let (x0, y0) = frame.point(Vec2::new(vp.min.x, vp.max.y));
    writeln!(out, "<defs>")?;
    writeln!(
        out,
        r#"<clipPath id="viewport"><rect x="{x0}" y="{y0}" width="{}" height="{}"/></clipPath>"#,
        vp.width(),
        vp.height()
    )?;
    writeln!(out, "</defs>")?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{view_w}" height="{view_h}" fill="white"/>"#
    )?;

    writeln!(
        out,
        r#"<text x="{:.3}" y="{:.3}" text-anchor="middle" font-family="sans-serif" font-size="{}">{}</text>"#,
        view_w / 2.0,
        TITLE_BAND,
        TITLE_FONT_SIZE,
        escape_xml(&title(&section.params))
    )?;

    writeln!(
        out,
        r#"<g clip-path="url(#viewport)" fill="{}" stroke="{}" stroke-width="{}">"#,
        layout.fill.hex(),
        layout.edge.hex(),
        layout.edge_width
    )?;
    for poly in &section.polygons {
        let mut pts = String::new();
        for p in &poly.points {
            let (x, y) = frame.point(*p);
            if !pts.is_empty() {
                pts.push(' ');
            }
            write!(pts, "{x:.3},{y:.3}")?;
        }
        writeln!(
            out,
            r#"<polygon data-layer="{}" data-path="{}" points="{pts}"/>"#,
            poly.track.layer, poly.track.path
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(
        out,
        r#"<rect x="{x0}" y="{y0}" width="{}" height="{}" fill="none" stroke="black" stroke-width="1"/>"#,
        vp.width(),
        vp.height()
    )?;

    let bar = &layout.scale_bar;
    let (bx0, by0) = frame.point(bar.start);
    let (bx1, by1) = frame.point(bar.end());
    let (lx, ly) = frame.point(bar.label_anchor());
    writeln!(
        out,
        r#"<line x1="{bx0:.3}" y1="{by0:.3}" x2="{bx1:.3}" y2="{by1:.3}" stroke="{}" stroke-width="{}"/>"#,
        bar.color.hex(),
        bar.line_width
    )?;
    writeln!(
        out,
        r#"<text x="{lx:.3}" y="{ly:.3}" text-anchor="middle" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
        bar.font_size,
        bar.color.hex(),
        escape_xml(&bar.label)
    )?;

    writeln!(out, "</svg>")?;
    Ok(out)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
