//! Turns geometry + value polygon into the bottom-up list of things to draw.

use crate::layout::{LayoutFrame, text_block_height};
use crate::model::{
    DrawLayer, GeometrySnapshot, LayerRole, PathData, Stroke, TextItem, TextRole, ValuePolygon,
};
use crate::text::TextMeasurer;
use polyradar_core::geom::point;
use polyradar_core::{ChartOptions, EmphasisMode, Series, ShadowMode};

/// Value text as shown under each label: shortest round-trip form, integral values keep `.0`.
pub fn format_value(v: f64) -> String {
    format!("{v:?}")
}

fn band_colors(options: &ChartOptions, band_count: usize) -> Vec<String> {
    let p = &options.palette;
    match band_count {
        0 => Vec::new(),
        1 => vec![p.outside.clone()],
        2 => vec![p.inside.clone(), p.outside.clone()],
        n => {
            let mut out = vec![p.inside.clone()];
            out.extend(std::iter::repeat_n(p.middle.clone(), n - 2));
            out.push(p.outside.clone());
            out
        }
    }
}

fn fill(role: LayerRole, path: PathData, color: &str) -> DrawLayer {
    DrawLayer {
        role,
        path,
        fill: Some(color.to_string()),
        stroke: None,
        blur: None,
        offset_y: 0.0,
    }
}

fn stroke(role: LayerRole, path: PathData, color: &str, width: f64) -> DrawLayer {
    DrawLayer {
        role,
        path,
        fill: None,
        stroke: Some(Stroke {
            color: color.to_string(),
            width,
        }),
        blur: None,
        offset_y: 0.0,
    }
}

/// shadow, background bands, edges, cover fill, cover outline.
pub fn compose_layers(
    geometry: &GeometrySnapshot,
    values: &ValuePolygon,
    options: &ChartOptions,
) -> Vec<DrawLayer> {
    let mut layers = Vec::new();

    if let Some(shadow) = &geometry.shadow {
        let mut layer = fill(LayerRole::Shadow, shadow.path.clone(), &options.shadow.color);
        layer.offset_y = shadow.offset_y;
        if shadow.mode == ShadowMode::Blur && shadow.radius > 0.0 {
            layer.blur = Some(shadow.radius);
        }
        layers.push(layer);
    }

    let colors = band_colors(options, geometry.bands.len());
    for (band, color) in geometry.bands.iter().zip(&colors) {
        layers.push(fill(LayerRole::Band, band.clone(), color));
    }

    if let Some(outer) = geometry.outer_ring() {
        let mut edges = outer.path.clone();
        if options.draw_spokes {
            edges.extend(&geometry.spokes);
        }
        layers.push(stroke(
            LayerRole::Edges,
            edges,
            &options.edge.color,
            options.edge.width,
        ));
    }

    layers.push(fill(LayerRole::Cover, values.path.clone(), &options.cover_color));
    if options.cover_edge.width > 0.0 {
        layers.push(stroke(
            LayerRole::CoverEdge,
            values.path.clone(),
            &options.cover_edge.color,
            options.cover_edge.width,
        ));
    }

    layers
}

/// Key label at each anchor, value text one line of its own font size below it.
pub fn compose_texts(
    geometry: &GeometrySnapshot,
    values: &ValuePolygon,
    series: &Series,
    frame: &LayoutFrame,
    options: &ChartOptions,
    measurer: &dyn TextMeasurer,
) -> Vec<TextItem> {
    let highlight = match options.emphasis.mode {
        EmphasisMode::None => None,
        EmphasisMode::HighlightMax => Some(values.max_index),
    };
    let text = &options.text;

    let mut keys = Vec::with_capacity(series.len());
    let mut vals = Vec::with_capacity(series.len());
    for (i, ((label, value), anchor)) in series.iter().zip(&geometry.label_anchors).enumerate() {
        let emphasized = highlight == Some(i);
        let (key_size, key_color) = if emphasized {
            (options.emphasis.text_size, options.emphasis.color.as_str())
        } else {
            (text.key_size, text.key_color.as_str())
        };
        let (value_size, value_color) = if emphasized {
            (options.emphasis.text_size, options.emphasis.color.as_str())
        } else {
            (text.value_size, text.value_color.as_str())
        };
        let value_offset = if emphasized {
            text_block_height(measurer, text, value_size)
        } else {
            frame.value_block_height
        };

        keys.push(TextItem {
            role: TextRole::Key,
            index: i,
            text: label.to_string(),
            position: *anchor,
            font_size: key_size,
            color: key_color.to_string(),
            emphasized,
        });
        vals.push(TextItem {
            role: TextRole::Value,
            index: i,
            text: format_value(value),
            position: point(anchor.x, anchor.y + value_offset),
            font_size: value_size,
            color: value_color.to_string(),
            emphasized,
        });
    }

    keys.extend(vals);
    keys
}
