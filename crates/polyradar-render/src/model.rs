use polyradar_core::ShadowMode;
use polyradar_core::geom::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Backend-neutral outline made of straight segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Closed polygon through `points` in order: first to last, then back to the first.
    pub fn closed_polygon(points: &[Point]) -> Self {
        let mut out = Self::new();
        out.append_polygon(points);
        out
    }

    /// Appends `points` as an additional closed sub-path.
    pub fn append_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        self.close();
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    pub fn extend(&mut self, other: &PathData) {
        self.commands.extend_from_slice(&other.commands);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every point the path visits, in command order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }
}

/// One closed polygon at a fixed radial scale from the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingGeometry {
    pub ratio: f64,
    pub vertices: Vec<Point>,
    pub path: PathData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowGeometry {
    pub mode: ShadowMode,
    pub radius: f64,
    /// Downward translation applied to the shadow outline.
    pub offset_y: f64,
    pub path: PathData,
}

/// Everything derived from bounds + edge count. Independent of data values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub edge_count: usize,
    pub center: Point,
    pub outer_radius: f64,
    /// Innermost first; the last ring is the outer boundary.
    pub rings: Vec<RingGeometry>,
    /// Background fills, innermost first. Band `k > 0` is ring `k` with ring `k - 1` cut out.
    pub bands: Vec<PathData>,
    /// Center-to-vertex lines for each outer vertex.
    pub spokes: PathData,
    pub anchor_ratio: f64,
    pub label_anchors: Vec<Point>,
    pub shadow: Option<ShadowGeometry>,
}

impl GeometrySnapshot {
    pub fn outer_ring(&self) -> Option<&RingGeometry> {
        self.rings.last()
    }

    pub fn outer_vertices(&self) -> &[Point] {
        self.outer_ring().map(|r| r.vertices.as_slice()).unwrap_or(&[])
    }

    pub fn is_degenerate(&self) -> bool {
        self.outer_radius <= 0.0 || self.edge_count == 0
    }
}

/// The data silhouette: outer vertices pulled toward the center by each entry's proportion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePolygon {
    pub proportions: Vec<f64>,
    pub vertices: Vec<Point>,
    pub path: PathData,
    /// First index holding the maximum value.
    pub max_index: usize,
    /// Amount subtracted from every proportion to keep the outline inside the boundary.
    pub inset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerRole {
    Shadow,
    Band,
    Edges,
    Cover,
    CoverEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawLayer {
    pub role: LayerRole,
    pub path: PathData,
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
    /// Blur radius in pixels.
    pub blur: Option<f64>,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    Key,
    Value,
}

/// Horizontally centered text with its baseline at `position.y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub role: TextRole,
    pub index: usize,
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub color: String,
    pub emphasized: bool,
}

/// Immutable render input for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub width: f64,
    pub height: f64,
    pub font_family: String,
    pub font_weight: Option<String>,
    pub geometry: Arc<GeometrySnapshot>,
    pub values: Arc<ValuePolygon>,
    /// Bottom-up draw order.
    pub layers: Vec<DrawLayer>,
    pub texts: Vec<TextItem>,
}
