use serde::{Deserialize, Serialize};

/// Scalar bounds used to normalize raw values into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
        }
    }
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min == max`: every value is either fully in (`>= max`) or fully out.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Normalized position of `value` between `min` and `max`, clamped to `[0, 1]`.
    ///
    /// Never divides by zero. NaN input maps to 0.
    pub fn proportion(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        if self.is_degenerate() {
            return if value >= self.max { 1.0 } else { 0.0 };
        }
        if value <= self.min {
            0.0
        } else if value >= self.max {
            1.0
        } else {
            let p = (value - self.min) / (self.max - self.min);
            if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_outside_the_range() {
        let r = ValueRange::new(0.0, 10.0);
        assert_eq!(r.proportion(-3.0), 0.0);
        assert_eq!(r.proportion(0.0), 0.0);
        assert_eq!(r.proportion(10.0), 1.0);
        assert_eq!(r.proportion(42.0), 1.0);
        assert!((r.proportion(5.5) - 0.55).abs() < 1e-12);
    }

    #[test]
    fn offset_range_is_relative_to_min() {
        let r = ValueRange::new(2.0, 4.0);
        assert!((r.proportion(3.0) - 0.5).abs() < 1e-12);
        assert_eq!(r.proportion(1.0), 0.0);
    }

    #[test]
    fn degenerate_range_is_a_step() {
        let r = ValueRange::new(5.0, 5.0);
        assert!(r.is_degenerate());
        assert_eq!(r.proportion(5.0), 1.0);
        assert_eq!(r.proportion(6.0), 1.0);
        assert_eq!(r.proportion(4.999), 0.0);
    }

    #[test]
    fn inverted_range_never_divides() {
        let r = ValueRange::new(10.0, 0.0);
        assert_eq!(r.proportion(5.0), 0.0);
        assert_eq!(r.proportion(11.0), 1.0);
    }

    #[test]
    fn nan_maps_to_zero() {
        assert_eq!(ValueRange::default().proportion(f64::NAN), 0.0);
    }
}
