//! Per-view state: the host reports size changes and pushes data; the chart keeps the latest
//! immutable geometry and value snapshots.

use crate::compose::{compose_layers, compose_texts};
use crate::layout::{LayoutFrame, layout_geometry};
use crate::mapper::{self, inset_offset};
use crate::model::{ChartSnapshot, GeometrySnapshot, ValuePolygon};
use crate::text::TextMeasurer;
use crate::{LayoutOptions, Result};
use polyradar_core::{ChartConfig, ChartOptions, Series};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartState {
    /// No bounds, no series. Rendering is a no-op.
    Empty,
    /// Bounds known, no valid series yet. Rendering is a no-op.
    LaidOut,
    /// A series is bound but bounds were never reported. Rendering is a no-op.
    AwaitingBounds,
    /// Geometry and value polygon are both current.
    Ready,
}

impl std::fmt::Display for ChartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChartState::Empty => "empty",
            ChartState::LaidOut => "laid out, unbound",
            ChartState::AwaitingBounds => "bound, awaiting bounds",
            ChartState::Ready => "ready",
        };
        f.write_str(s)
    }
}

struct Bound {
    series: Series,
    max_index: usize,
    values: Option<Arc<ValuePolygon>>,
}

pub struct RadarChart {
    options: ChartOptions,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    frame: Option<LayoutFrame>,
    geometry: Option<Arc<GeometrySnapshot>>,
    bound: Option<Bound>,
}

impl std::fmt::Debug for RadarChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarChart")
            .field("state", &self.state())
            .field("edge_count", &self.edge_count())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Default for RadarChart {
    fn default() -> Self {
        Self::new(ChartOptions::default(), &LayoutOptions::default())
    }
}

impl RadarChart {
    pub fn new(options: ChartOptions, layout: &LayoutOptions) -> Self {
        Self {
            options,
            measurer: Arc::clone(&layout.text_measurer),
            frame: None,
            geometry: None,
            bound: None,
        }
    }

    /// Resolves `config` once; later changes to the table do not affect this chart.
    pub fn from_config(config: &ChartConfig, layout: &LayoutOptions) -> Result<Self> {
        Ok(Self::new(ChartOptions::from_config(config)?, layout))
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn state(&self) -> ChartState {
        match (&self.frame, &self.bound) {
            (None, None) => ChartState::Empty,
            (Some(_), None) => ChartState::LaidOut,
            (None, Some(_)) => ChartState::AwaitingBounds,
            (Some(_), Some(b)) if b.values.is_some() => ChartState::Ready,
            (Some(_), Some(_)) => ChartState::AwaitingBounds,
        }
    }

    /// Number of polygon sides; 0 until a valid series is bound.
    pub fn edge_count(&self) -> usize {
        self.bound.as_ref().map(|b| b.series.len()).unwrap_or(0)
    }

    pub fn frame(&self) -> Option<&LayoutFrame> {
        self.frame.as_ref()
    }

    pub fn geometry(&self) -> Option<Arc<GeometrySnapshot>> {
        self.geometry.clone()
    }

    pub fn series(&self) -> Option<&Series> {
        self.bound.as_ref().map(|b| &b.series)
    }

    pub fn max_index(&self) -> Option<usize> {
        self.bound.as_ref().map(|b| b.max_index)
    }

    pub fn value_polygon(&self) -> Option<Arc<ValuePolygon>> {
        self.bound.as_ref().and_then(|b| b.values.clone())
    }

    /// Host callback for a drawing-surface size change. Recomputes the geometry and, when a
    /// series is bound, re-derives its value polygon.
    pub fn on_bounds_changed(&mut self, width: f64, height: f64) {
        let frame = LayoutFrame::for_bounds(width, height, &self.options.text, &*self.measurer);
        tracing::debug!(
            width,
            height,
            outer_radius = frame.outer_radius,
            "bounds changed"
        );
        self.frame = Some(frame);

        let Some(bound) = &self.bound else {
            self.geometry = None;
            return;
        };
        let geometry = Arc::new(layout_geometry(bound.series.len(), &frame, &self.options));
        let values = match self.map(&bound.series, &geometry) {
            Ok(values) => Some(Arc::new(values)),
            Err(err) => {
                tracing::warn!(error = %err, "value polygon not recomputed");
                None
            }
        };
        self.geometry = Some(geometry);
        if let Some(bound) = &mut self.bound {
            bound.values = values;
        }
    }

    /// Host call for new data. Returns `false` (leaving all prior state untouched) when the
    /// series has fewer than three entries.
    pub fn bind_series(&mut self, series: Series) -> bool {
        match self.try_bind_series(series) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "series rejected");
                false
            }
        }
    }

    pub fn try_bind_series(&mut self, series: Series) -> Result<()> {
        series.validate()?;
        let max_index = mapper::max_index(&series).unwrap_or(0);

        // Geometry is reused unless the edge count changed.
        let geometry = match (&self.frame, &self.geometry) {
            (Some(_), Some(g)) if g.edge_count == series.len() => Some(Arc::clone(g)),
            (Some(frame), _) => Some(Arc::new(layout_geometry(
                series.len(),
                frame,
                &self.options,
            ))),
            (None, _) => None,
        };
        let values = match &geometry {
            Some(g) => Some(Arc::new(self.map(&series, g)?)),
            None => None,
        };

        tracing::debug!(
            edge_count = series.len(),
            max_index,
            laid_out = geometry.is_some(),
            "series bound"
        );
        self.geometry = geometry;
        self.bound = Some(Bound {
            series,
            max_index,
            values,
        });
        Ok(())
    }

    fn map(&self, series: &Series, geometry: &GeometrySnapshot) -> Result<ValuePolygon> {
        let inset = if self.options.inset_stroke {
            inset_offset(self.options.cover_edge.width, geometry.outer_radius)
        } else {
            0.0
        };
        mapper::bind(series, &self.options.range, geometry, inset)
    }

    /// Frame to draw, or `None` while nothing can be drawn.
    pub fn snapshot(&self) -> Option<ChartSnapshot> {
        let frame = self.frame.as_ref()?;
        let geometry = self.geometry.as_ref()?;
        let bound = self.bound.as_ref()?;
        let values = bound.values.as_ref()?;

        Some(ChartSnapshot {
            width: frame.width,
            height: frame.height,
            font_family: self.options.text.font_family.clone(),
            font_weight: self.options.text.font_weight.clone(),
            geometry: Arc::clone(geometry),
            values: Arc::clone(values),
            layers: compose_layers(geometry, values, &self.options),
            texts: compose_texts(
                geometry,
                values,
                &bound.series,
                frame,
                &self.options,
                &*self.measurer,
            ),
        })
    }

    /// Like [`RadarChart::snapshot`], but reports why nothing can be drawn.
    pub fn require_snapshot(&self) -> Result<ChartSnapshot> {
        self.snapshot().ok_or(crate::Error::NotReady {
            state: self.state(),
        })
    }
}
