#![forbid(unsafe_code)]

//! Headless layout + SVG rendering for polygon (radar) charts.
//!
//! - [`layout`]: ring vertices, bands, spokes and label anchors from bounds and edge count
//! - [`mapper`]: value polygon and max-value index from a [`Series`](polyradar_core::Series)
//! - [`chart::RadarChart`]: per-view state driven by bounds changes and data binds
//! - [`svg`]: draws a [`model::ChartSnapshot`] as SVG

pub mod chart;
pub mod compose;
pub mod layout;
pub mod mapper;
pub mod model;
pub mod svg;
pub mod text;

use crate::chart::{ChartState, RadarChart};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use polyradar_core::{ChartOptions, Series};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] polyradar_core::Error),
    #[error("series has {series} entries but the geometry has {geometry} vertices")]
    EdgeCountMismatch { series: usize, geometry: usize },
    #[error("chart has nothing to draw (state: {state})")]
    NotReady { state: ChartState },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// One-shot helper: lay out `series` on a `width` x `height` surface and draw it as SVG.
pub fn render_svg(
    series: Series,
    width: f64,
    height: f64,
    options: ChartOptions,
    layout: &LayoutOptions,
    svg_options: &svg::SvgRenderOptions,
) -> Result<String> {
    let mut chart = RadarChart::new(options, layout);
    chart.on_bounds_changed(width, height);
    chart.try_bind_series(series)?;
    let snapshot = chart.require_snapshot()?;
    Ok(svg::render_chart_svg(&snapshot, svg_options))
}
