//! SVG drawing surface for [`ChartSnapshot`]s.

use crate::model::{
    ChartSnapshot, DrawLayer, FillRule, LayerRole, PathCommand, PathData, TextRole,
};
use std::fmt::Write as _;

mod util;

use util::{escape_xml, escape_xml_into, fmt, fmt_path_into};

/// Skia's blur-radius to Gaussian sigma conversion.
const BLUR_SIGMA_SCALE: f64 = 0.57735;
const BLUR_SIGMA_BIAS: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes internal ids such as the shadow filter.
    pub diagram_id: Option<String>,
    /// CSS color painted behind the chart.
    pub background: Option<String>,
}

pub fn path_d(path: &PathData) -> String {
    let mut out = String::new();
    for cmd in &path.commands {
        if !out.is_empty() {
            out.push(' ');
        }
        match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                out.push(if matches!(cmd, PathCommand::MoveTo(_)) {
                    'M'
                } else {
                    'L'
                });
                fmt_path_into(&mut out, p.x);
                out.push(',');
                fmt_path_into(&mut out, p.y);
            }
            PathCommand::Close => out.push('Z'),
        }
    }
    out
}

fn blur_std_deviation(radius: f64) -> f64 {
    radius * BLUR_SIGMA_SCALE + BLUR_SIGMA_BIAS
}

fn layer_class(role: LayerRole) -> &'static str {
    match role {
        LayerRole::Shadow => "polygonShadow",
        LayerRole::Band => "polygonBand",
        LayerRole::Edges => "polygonEdges",
        LayerRole::Cover => "polygonCover",
        LayerRole::CoverEdge => "polygonCoverEdge",
    }
}

fn write_layer(out: &mut String, layer: &DrawLayer, filter_id: &str) {
    if layer.path.is_empty() {
        return;
    }
    let translated = layer.offset_y != 0.0;
    if translated {
        let _ = write!(out, r#"<g transform="translate(0, {})">"#, fmt(layer.offset_y));
    }

    let _ = write!(
        out,
        r#"<path class="{}" d="{}""#,
        layer_class(layer.role),
        path_d(&layer.path)
    );
    match &layer.fill {
        Some(color) => {
            out.push_str(r#" fill=""#);
            escape_xml_into(out, color);
            out.push('"');
            if layer.path.fill_rule == FillRule::EvenOdd {
                out.push_str(r#" fill-rule="evenodd""#);
            }
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &layer.stroke {
        out.push_str(r#" stroke=""#);
        escape_xml_into(out, &stroke.color);
        let _ = write!(
            out,
            r#"" stroke-width="{}" stroke-linejoin="round""#,
            fmt(stroke.width)
        );
    }
    if layer.blur.is_some() {
        let _ = write!(out, r#" filter="url(#{filter_id})""#);
    }
    out.push_str("/>");

    if translated {
        out.push_str("</g>");
    }
}

/// Writes the snapshot's layers bottom-up, followed by the label text.
pub fn render_chart_svg(snapshot: &ChartSnapshot, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("polygon");
    let id = escape_xml(diagram_id);
    let filter_id = format!("{id}-shadow-blur");

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="radar""#,
        w = fmt(snapshot.width),
        h = fmt(snapshot.height),
    );
    if let Some(bg) = &options.background {
        out.push_str(r#" style="background-color: "#);
        escape_xml_into(&mut out, bg);
        out.push_str(r#";""#);
    }
    out.push('>');

    if let Some(blur) = snapshot.layers.iter().find_map(|l| l.blur) {
        let _ = write!(
            &mut out,
            r#"<defs><filter id="{filter_id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter></defs>"#,
            fmt(blur_std_deviation(blur))
        );
    }

    for layer in &snapshot.layers {
        write_layer(&mut out, layer, &filter_id);
    }

    out.push_str(r#"<g class="polygonLabels" font-family=""#);
    escape_xml_into(&mut out, &snapshot.font_family);
    out.push('"');
    if let Some(weight) = &snapshot.font_weight {
        out.push_str(r#" font-weight=""#);
        escape_xml_into(&mut out, weight);
        out.push('"');
    }
    out.push_str(r#" text-anchor="middle">"#);
    for t in &snapshot.texts {
        let class = match (t.role, t.emphasized) {
            (TextRole::Key, false) => "polygonKey",
            (TextRole::Key, true) => "polygonKey polygonEmphasis",
            (TextRole::Value, false) => "polygonValue",
            (TextRole::Value, true) => "polygonValue polygonEmphasis",
        };
        let _ = write!(
            &mut out,
            r#"<text class="{class}" x="{x}" y="{y}" font-size="{size}" fill="{fill}">"#,
            x = fmt(t.position.x),
            y = fmt(t.position.y),
            size = fmt(t.font_size),
            fill = escape_xml(&t.color),
        );
        escape_xml_into(&mut out, &t.text);
        out.push_str("</text>");
    }
    out.push_str("</g></svg>\n");
    out
}
