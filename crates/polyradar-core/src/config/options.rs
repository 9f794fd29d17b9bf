use super::ChartConfig;
use crate::range::ValueRange;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the background rings between center and outer boundary are placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingMode {
    /// Ring boundaries fall at cumulative weight ratios (`inside / total`,
    /// `(inside + middle) / total`).
    Weighted { inside: u32, middle: u32, outside: u32 },
    /// Ring boundaries at literal ratios of the outer radius.
    Fixed { inside: f64, middle: f64 },
    /// Only the outer boundary.
    Single,
}

impl RingMode {
    /// Radial scale of every ring, innermost first. The last entry is always the outer ring (1).
    pub fn ratios(&self) -> Vec<f64> {
        match *self {
            RingMode::Weighted {
                inside,
                middle,
                outside,
            } => {
                let total = f64::from(inside) + f64::from(middle) + f64::from(outside);
                if total <= 0.0 {
                    return vec![1.0];
                }
                vec![
                    f64::from(inside) / total,
                    (f64::from(inside) + f64::from(middle)) / total,
                    1.0,
                ]
            }
            RingMode::Fixed { inside, middle } => vec![inside, middle, 1.0],
            RingMode::Single => vec![1.0],
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            RingMode::Weighted {
                inside,
                middle,
                outside,
            } => {
                if u64::from(inside) + u64::from(middle) + u64::from(outside) == 0 {
                    return Err(Error::config("ring weights must not all be zero"));
                }
            }
            RingMode::Fixed { inside, middle } => {
                let ok = inside.is_finite()
                    && middle.is_finite()
                    && (0.0..=1.0).contains(&inside)
                    && (inside..=1.0).contains(&middle);
                if !ok {
                    return Err(Error::config(format!(
                        "fixed ring ratios must satisfy 0 <= inside <= middle <= 1 (got {inside}, {middle})"
                    )));
                }
            }
            RingMode::Single => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmphasisMode {
    #[default]
    None,
    /// The vertex holding the (first) maximum value gets its own text size and color.
    HighlightMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShadowMode {
    None,
    #[default]
    Blur,
    Offset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub inside: String,
    pub middle: String,
    pub outside: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub mode: ShadowMode,
    /// `shadow radius = outer radius / radius_divisor`.
    pub radius_divisor: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub key_size: f64,
    pub value_size: f64,
    pub key_color: String,
    pub value_color: String,
    /// Gap between the outer boundary and the label block.
    pub graph_margin: f64,
    pub font_family: String,
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisStyle {
    pub mode: EmphasisMode,
    pub text_size: f64,
    pub color: String,
}

/// Typed view over a [`ChartConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub range: ValueRange,
    pub rings: RingMode,
    pub palette: Palette,
    pub edge: StrokeStyle,
    pub draw_spokes: bool,
    pub shadow: ShadowStyle,
    pub cover_color: String,
    pub cover_edge: StrokeStyle,
    /// Shrink data proportions by half the cover stroke so the outline stays inside the outer
    /// boundary.
    pub inset_stroke: bool,
    pub text: TextOptions,
    pub emphasis: EmphasisStyle,
}

impl Default for ChartOptions {
    /// Same values as [`ChartConfig::default`].
    fn default() -> Self {
        Self {
            range: ValueRange::default(),
            rings: RingMode::Weighted {
                inside: 3,
                middle: 3,
                outside: 4,
            },
            palette: Palette {
                inside: "#F5F8FF".to_string(),
                middle: "#E8EEFC".to_string(),
                outside: "#DCE5FA".to_string(),
            },
            edge: StrokeStyle {
                width: 2.0,
                color: "#FFFFFF".to_string(),
            },
            draw_spokes: true,
            shadow: ShadowStyle {
                mode: ShadowMode::Blur,
                radius_divisor: 9.0,
                color: "#536DFE33".to_string(),
            },
            cover_color: "#536DFE80".to_string(),
            cover_edge: StrokeStyle {
                width: 2.0,
                color: "#536DFE".to_string(),
            },
            inset_stroke: false,
            text: TextOptions {
                key_size: 14.0,
                value_size: 12.0,
                key_color: "#333333".to_string(),
                value_color: "#536DFE".to_string(),
                graph_margin: 8.0,
                font_family: "sans-serif".to_string(),
                font_weight: Some("bold".to_string()),
            },
            emphasis: EmphasisStyle {
                mode: EmphasisMode::None,
                text_size: 16.0,
                color: "#FF4081".to_string(),
            },
        }
    }
}

impl ChartOptions {
    pub fn from_config(cfg: &ChartConfig) -> Result<Self> {
        let defaults = ChartConfig::default();
        // Absent (or null) keys take the built-in default; present keys must have the right type.
        let present = |path: &str| cfg.lookup(path).is_some_and(|v| !v.is_null());
        let num = |path: &str| -> Result<f64> {
            let v = if present(path) {
                cfg.get_f64(path)
                    .ok_or_else(|| Error::config(format!("`{path}` must be a number")))?
            } else {
                defaults
                    .get_f64(path)
                    .ok_or_else(|| Error::config(format!("missing numeric key `{path}`")))?
            };
            if v.is_finite() {
                Ok(v)
            } else {
                Err(Error::config(format!("`{path}` must be finite")))
            }
        };
        let non_negative = |path: &str| -> Result<f64> {
            let v = num(path)?;
            if v < 0.0 {
                return Err(Error::config(format!("`{path}` must not be negative")));
            }
            Ok(v)
        };
        let weight = |path: &str| -> Result<u32> {
            let v = non_negative(path)?;
            if v.fract() != 0.0 || v > f64::from(u32::MAX) {
                return Err(Error::config(format!("`{path}` must be a whole number")));
            }
            Ok(v as u32)
        };
        let text = |path: &str| -> Result<String> {
            let v = if present(path) {
                cfg.get_str(path)
                    .ok_or_else(|| Error::config(format!("`{path}` must be a string")))?
            } else {
                defaults.get_str(path).unwrap_or_default()
            };
            Ok(v.to_string())
        };
        let flag = |path: &str| -> Result<bool> {
            if present(path) {
                cfg.get_bool(path)
                    .ok_or_else(|| Error::config(format!("`{path}` must be a bool")))
            } else {
                Ok(defaults.get_bool(path).unwrap_or(false))
            }
        };

        let rings = match text("rings.mode")?.trim() {
            "weighted" => RingMode::Weighted {
                inside: weight("rings.insideWeight")?,
                middle: weight("rings.middleWeight")?,
                outside: weight("rings.outsideWeight")?,
            },
            "fixed" | "fixedRatio" => RingMode::Fixed {
                inside: num("rings.insideRatio")?,
                middle: num("rings.middleRatio")?,
            },
            "single" | "singleRing" => RingMode::Single,
            other => {
                return Err(Error::config(format!("unknown ring mode `{other}`")));
            }
        };
        rings.validate()?;

        let shadow_mode = match text("shadow.mode")?.trim() {
            "none" => ShadowMode::None,
            "blur" => ShadowMode::Blur,
            "offset" | "layer" => ShadowMode::Offset,
            other => {
                return Err(Error::config(format!("unknown shadow mode `{other}`")));
            }
        };
        let radius_divisor = num("shadow.radiusDivisor")?;
        if radius_divisor <= 0.0 {
            return Err(Error::config("`shadow.radiusDivisor` must be positive"));
        }

        let emphasis_mode = match text("emphasis.mode")?.trim() {
            "none" => EmphasisMode::None,
            "highlightMax" | "max" => EmphasisMode::HighlightMax,
            other => {
                return Err(Error::config(format!("unknown emphasis mode `{other}`")));
            }
        };

        let font_weight = text("text.fontWeight")?;
        let range = ValueRange::new(num("range.min")?, num("range.max")?);
        if range.min > range.max {
            tracing::warn!(
                min = range.min,
                max = range.max,
                "inverted value range; values clamp to the nearer bound"
            );
        }

        let options = Self {
            range,
            rings,
            palette: Palette {
                inside: text("colors.inside")?,
                middle: text("colors.middle")?,
                outside: text("colors.outside")?,
            },
            edge: StrokeStyle {
                width: non_negative("edge.width")?,
                color: text("edge.color")?,
            },
            draw_spokes: flag("edge.drawSpokes")?,
            shadow: ShadowStyle {
                mode: shadow_mode,
                radius_divisor,
                color: text("shadow.color")?,
            },
            cover_color: text("cover.color")?,
            cover_edge: StrokeStyle {
                width: non_negative("cover.edgeWidth")?,
                color: text("cover.edgeColor")?,
            },
            inset_stroke: flag("cover.insetStroke")?,
            text: TextOptions {
                key_size: non_negative("text.keySize")?,
                value_size: non_negative("text.valueSize")?,
                key_color: text("text.keyColor")?,
                value_color: text("text.valueColor")?,
                graph_margin: num("text.graphMargin")?,
                font_family: text("text.fontFamily")?,
                font_weight: (!font_weight.trim().is_empty()).then_some(font_weight),
            },
            emphasis: EmphasisStyle {
                mode: emphasis_mode,
                text_size: non_negative("emphasis.textSize")?,
                color: text("emphasis.color")?,
            },
        };
        tracing::debug!(
            rings = ?options.rings,
            shadow = ?options.shadow.mode,
            emphasis = ?options.emphasis.mode,
            draw_spokes = options.draw_spokes,
            inset_stroke = options.inset_stroke,
            "chart options resolved"
        );
        Ok(options)
    }
}
