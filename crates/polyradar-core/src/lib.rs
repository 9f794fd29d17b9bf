#![forbid(unsafe_code)]

//! Data model for polygon (radar/spider) charts.
//!
//! - [`Series`]: insertion-ordered `label -> value` data; order fixes each label's angular slot
//! - [`ValueRange`]: clamp-and-normalize bounds for raw values
//! - [`ChartConfig`] / [`ChartOptions`]: the flat style table and its typed view
//! - [`geom`]: point/vector aliases shared by layout and rendering

pub mod config;
pub mod error;
pub mod geom;
pub mod range;
pub mod series;

pub use config::{
    ChartConfig, ChartOptions, EmphasisMode, EmphasisStyle, Palette, RingMode, ShadowMode,
    ShadowStyle, StrokeStyle, TextOptions,
};
pub use error::{Error, Result};
pub use range::ValueRange;
pub use series::{MIN_EDGES, Series};
