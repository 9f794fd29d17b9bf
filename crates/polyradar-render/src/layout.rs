//! Layout engine: everything that depends on bounds and edge count, nothing that depends on data.

use crate::model::{FillRule, GeometrySnapshot, PathData, RingGeometry, ShadowGeometry};
use crate::text::{TextMeasurer, TextStyle};
use polyradar_core::geom::{Point, clockwise_from_top, point, scale_from};
use polyradar_core::{ChartOptions, RingMode, ShadowMode, ShadowStyle, TextOptions};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Multiple of a text block reserved around the polygon for the key and value lines.
const TEXT_BLOCK_RESERVE: f64 = 1.5;

/// Bounds-derived frame, computed once per size change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub outer_radius: f64,
    pub key_block_height: f64,
    pub value_block_height: f64,
}

impl LayoutFrame {
    pub fn for_bounds(
        width: f64,
        height: f64,
        text: &TextOptions,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let key_block_height = text_block_height(measurer, text, text.key_size);
        let value_block_height = text_block_height(measurer, text, text.value_size);
        let outer_radius = outer_radius_for_bounds(
            width,
            height,
            key_block_height,
            value_block_height,
            text.graph_margin,
        );
        Self {
            width,
            height,
            center: point(width / 2.0, height / 2.0),
            outer_radius,
            key_block_height,
            value_block_height,
        }
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// One line of chart text at `font_size` in the configured family and weight.
pub fn text_block_height(measurer: &dyn TextMeasurer, text: &TextOptions, font_size: f64) -> f64 {
    let style = TextStyle {
        font_family: Some(text.font_family.clone()),
        font_size,
        font_weight: text.font_weight.clone(),
    };
    measurer.font_metrics(&style).block_height()
}

/// Half the shorter side, minus room for the key and value text blocks and the text margin.
///
/// May be zero or negative for small surfaces; the ring geometry then degenerates to the center.
pub fn outer_radius_for_bounds(
    width: f64,
    height: f64,
    key_block_height: f64,
    value_block_height: f64,
    margin: f64,
) -> f64 {
    width.min(height) / 2.0
        - TEXT_BLOCK_RESERVE * value_block_height
        - TEXT_BLOCK_RESERVE * key_block_height
        - margin
}

/// Vertex `i` sits at `i * 2π / edge_count` clockwise from straight up.
pub fn outer_vertices(edge_count: usize, center: Point, radius: f64) -> Vec<Point> {
    let radius = effective_radius(radius);
    if edge_count == 0 {
        return Vec::new();
    }
    let theta = TAU / edge_count as f64;
    (0..edge_count)
        .map(|i| clockwise_from_top(center, radius, theta * i as f64))
        .collect()
}

fn effective_radius(radius: f64) -> f64 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        0.0
    }
}

/// One ring per entry of `ratios`, in the same order, sharing the outer ring's angular slots.
pub fn compute_ring_geometry(
    edge_count: usize,
    center: Point,
    outer_radius: f64,
    ratios: &[f64],
) -> Vec<RingGeometry> {
    let outer = outer_vertices(edge_count, center, outer_radius);
    ratios
        .iter()
        .map(|&ratio| {
            let vertices: Vec<Point> = outer
                .iter()
                .map(|&v| scale_from(center, v, ratio))
                .collect();
            let path = PathData::closed_polygon(&vertices);
            RingGeometry {
                ratio,
                vertices,
                path,
            }
        })
        .collect()
}

/// Radial scale of each ring for `mode`, innermost first, outer ring last.
pub fn ring_ratios(mode: &RingMode) -> Vec<f64> {
    mode.ratios()
}

/// Lines from the center to every outer vertex.
pub fn spoke_path(center: Point, outer: &[Point]) -> PathData {
    let mut out = PathData::new();
    for v in outer {
        out.move_to(center).line_to(*v);
    }
    out
}

/// Fill regions between consecutive rings. The innermost band is its ring's full polygon; each
/// further band carries the previous ring as a second sub-path under the even-odd rule.
pub fn band_paths(rings: &[RingGeometry]) -> Vec<PathData> {
    let mut out = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        if i == 0 {
            out.push(ring.path.clone());
            continue;
        }
        let mut band = PathData::closed_polygon(&rings[i - 1].vertices);
        band.append_polygon(&ring.vertices);
        out.push(band.with_fill_rule(FillRule::EvenOdd));
    }
    out
}

/// `1 + (margin + label_block_height) / outer_radius`; 1 for a degenerate radius.
pub fn anchor_ratio(margin: f64, label_block_height: f64, outer_radius: f64) -> f64 {
    let radius = effective_radius(outer_radius);
    if radius == 0.0 {
        return 1.0;
    }
    1.0 + (margin + label_block_height) / radius
}

pub fn label_anchors(center: Point, outer: &[Point], ratio: f64) -> Vec<Point> {
    outer.iter().map(|&v| scale_from(center, v, ratio)).collect()
}

fn shadow_geometry(
    style: &ShadowStyle,
    outer_radius: f64,
    outer: &RingGeometry,
) -> Option<ShadowGeometry> {
    if style.mode == ShadowMode::None {
        return None;
    }
    let radius = effective_radius(outer_radius) / style.radius_divisor;
    Some(ShadowGeometry {
        mode: style.mode,
        radius,
        offset_y: radius / 2.0,
        path: outer.path.clone(),
    })
}

/// Full geometry pass for one frame and edge count.
pub fn layout_geometry(
    edge_count: usize,
    frame: &LayoutFrame,
    options: &ChartOptions,
) -> GeometrySnapshot {
    let outer_radius = effective_radius(frame.outer_radius);
    if outer_radius == 0.0 && edge_count > 0 {
        tracing::debug!(
            radius = frame.outer_radius,
            width = frame.width,
            height = frame.height,
            "surface too small; polygon collapses to its center"
        );
    }

    let ratios = ring_ratios(&options.rings);
    let rings = compute_ring_geometry(edge_count, frame.center, outer_radius, &ratios);
    let bands = band_paths(&rings);

    let outer: &[Point] = rings.last().map(|r| r.vertices.as_slice()).unwrap_or(&[]);
    let spokes = spoke_path(frame.center, outer);
    let anchor_ratio = anchor_ratio(
        options.text.graph_margin,
        frame.value_block_height,
        outer_radius,
    );
    let label_anchors = label_anchors(frame.center, outer, anchor_ratio);
    let shadow = rings
        .last()
        .and_then(|ring| shadow_geometry(&options.shadow, outer_radius, ring));

    tracing::trace!(edge_count, outer_radius, rings = rings.len(), "ring geometry computed");

    GeometrySnapshot {
        edge_count,
        center: frame.center,
        outer_radius,
        rings,
        bands,
        spokes,
        anchor_ratio,
        label_anchors,
        shadow,
    }
}
