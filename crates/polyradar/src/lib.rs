#![forbid(unsafe_code)]

//! `polyradar` lays out and draws polygon (radar/spider) charts without a UI toolkit.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`polyradar::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use polyradar_core::*;

#[cfg(feature = "render")]
pub mod render {
    use crate::{ChartConfig, ChartOptions, Series};

    pub use polyradar_render::chart::{ChartState, RadarChart};
    pub use polyradar_render::model::{ChartSnapshot, GeometrySnapshot, ValuePolygon};
    pub use polyradar_render::svg::{SvgRenderOptions, render_chart_svg};
    pub use polyradar_render::text::{DeterministicTextMeasurer, FontMetrics, TextMeasurer};
    pub use polyradar_render::{LayoutOptions, render_svg};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] polyradar_core::Error),
        #[error(transparent)]
        Render(#[from] polyradar_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several charts can be
    /// inlined into one document without their internal ids (e.g. the shadow filter) colliding.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "p-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "p-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "p" {
            return "p-untitled".to_string();
        }
        out.to_string()
    }

    /// Resolves `config`, lays out `series` on a `width` x `height` surface and draws it.
    pub fn render_svg_with_config(
        series: Series,
        config: &ChartConfig,
        width: f64,
        height: f64,
        layout: &LayoutOptions,
        svg: &SvgRenderOptions,
    ) -> Result<String> {
        let options = ChartOptions::from_config(config)?;
        Ok(render_svg(series, width, height, options, layout, svg)?)
    }

}
