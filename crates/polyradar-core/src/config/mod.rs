use crate::Result;
use serde_json::{Value, json};

mod options;

pub use options::{
    ChartOptions, EmphasisMode, EmphasisStyle, Palette, RingMode, ShadowMode, ShadowStyle,
    StrokeStyle, TextOptions,
};

/// Flat style/configuration table, read once when a chart is constructed.
///
/// Values are kept as JSON so hosts can pass through whatever their styling system produced;
/// [`ChartOptions::from_config`] resolves the typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig(Value);

impl Default for ChartConfig {
    fn default() -> Self {
        Self(default_table())
    }
}

impl ChartConfig {
    /// Defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        cfg
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::with_overrides(&value))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Ok(Self::with_overrides(&value))
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        let v = self.lookup(dotted_path)?;
        v.as_bool().or_else(|| match v.as_str()?.trim() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        })
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.lookup(dotted_path)?;
        v.as_f64()
            .or_else(|| v.as_i64().map(|n| n as f64))
            .or_else(|| v.as_u64().map(|n| n as f64))
            .or_else(|| v.as_str()?.trim().trim_end_matches("px").parse().ok())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

/// Objects merge key by key; anything else in `incoming` replaces what `base` held.
fn deep_merge_value(base: &mut Value, incoming: &Value) {
    if let (Value::Object(base_map), Value::Object(in_map)) = (&mut *base, incoming) {
        for (key, in_value) in in_map {
            let slot = base_map.entry(key.clone()).or_insert(Value::Null);
            deep_merge_value(slot, in_value);
        }
        return;
    }
    *base = incoming.clone();
}

fn default_table() -> Value {
    json!({
        "range": { "min": 0, "max": 10 },
        "rings": {
            "mode": "weighted",
            "insideWeight": 3,
            "middleWeight": 3,
            "outsideWeight": 4,
            "insideRatio": 0.3,
            "middleRatio": 0.6
        },
        "colors": {
            "inside": "#F5F8FF",
            "middle": "#E8EEFC",
            "outside": "#DCE5FA"
        },
        "edge": { "width": 2, "color": "#FFFFFF", "drawSpokes": true },
        "shadow": { "mode": "blur", "radiusDivisor": 9, "color": "#536DFE33" },
        "cover": {
            "color": "#536DFE80",
            "edgeColor": "#536DFE",
            "edgeWidth": 2,
            "insetStroke": false
        },
        "text": {
            "keySize": 14,
            "valueSize": 12,
            "keyColor": "#333333",
            "valueColor": "#536DFE",
            "graphMargin": 8,
            "fontFamily": "sans-serif",
            "fontWeight": "bold"
        },
        "emphasis": { "mode": "none", "textSize": 16, "color": "#FF4081" }
    })
}
