use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

/// Vertical font extents, both positive distances from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl FontMetrics {
    /// Height of one line of text (`ascent + descent`).
    pub fn block_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Font-metrics collaborator supplied by the host.
pub trait TextMeasurer {
    fn font_metrics(&self, style: &TextStyle) -> FontMetrics;
}

/// Font-independent measurer: a line is `ascent_factor + descent_factor` em tall.
/// Zero factors fall back to 0.95 / 0.25.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub ascent_factor: f64,
    pub descent_factor: f64,
}

impl DeterministicTextMeasurer {
    fn factor(v: f64, fallback: f64) -> f64 {
        if v == 0.0 { fallback } else { v }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn font_metrics(&self, style: &TextStyle) -> FontMetrics {
        let font_size = style.font_size.max(0.0);
        FontMetrics {
            ascent: font_size * Self::factor(self.ascent_factor, 0.95),
            descent: font_size * Self::factor(self.descent_factor, 0.25),
        }
    }
}
