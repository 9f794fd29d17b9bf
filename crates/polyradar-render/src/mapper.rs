//! Data mapper: turns a bound series into the value polygon drawn over the outer ring.

use crate::model::{GeometrySnapshot, PathData, ValuePolygon};
use crate::{Error, Result};
use polyradar_core::geom::scale_from;
use polyradar_core::{Series, ValueRange};

/// Index of the first occurrence of the largest value. NaN entries are skipped; an all-NaN
/// series reports 0.
pub fn max_index(series: &Series) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in series.values().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i).or(if series.is_empty() { None } else { Some(0) })
}

/// Proportion lost to half of an outline of `stroke_width` drawn on a polygon of `outer_radius`.
pub fn inset_offset(stroke_width: f64, outer_radius: f64) -> f64 {
    let usable = outer_radius.is_finite() && outer_radius > 0.0 && stroke_width > 0.0;
    if !usable {
        return 0.0;
    }
    stroke_width / 2.0 / outer_radius
}

/// Per-entry proportion in series order, each reduced by `inset` and floored at 0.
pub fn proportions(series: &Series, range: &ValueRange, inset: f64) -> Vec<f64> {
    series
        .values()
        .map(|v| (range.proportion(v) - inset).max(0.0))
        .collect()
}

/// Validates `series` and maps it onto the outer ring of `geometry`.
///
/// Pure: on error nothing is produced, so callers keep whatever they held before.
pub fn bind(
    series: &Series,
    range: &ValueRange,
    geometry: &GeometrySnapshot,
    inset: f64,
) -> Result<ValuePolygon> {
    series.validate()?;
    let outer = geometry.outer_vertices();
    if outer.len() != series.len() {
        return Err(Error::EdgeCountMismatch {
            series: series.len(),
            geometry: outer.len(),
        });
    }
    if range.is_degenerate() {
        tracing::debug!(
            min = range.min,
            max = range.max,
            "degenerate value range; values snap to center or boundary"
        );
    }

    let proportions = proportions(series, range, inset);
    let vertices: Vec<_> = outer
        .iter()
        .zip(&proportions)
        .map(|(&v, &p)| scale_from(geometry.center, v, p))
        .collect();
    let path = PathData::closed_polygon(&vertices);

    Ok(ValuePolygon {
        proportions,
        vertices,
        path,
        max_index: max_index(series).unwrap_or(0),
        inset,
    })
}
