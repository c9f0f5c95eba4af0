//! StatValue - Flat → Increased → More accumulator for resistance statistics

use serde::{Deserialize, Serialize};

/// A statistic built up from modifiers
///
/// Final value is `(base + flat) × (1 + increased) × Π(1 + more)`.
/// Increased bonuses add to each other, more bonuses multiply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub flat: f64,
    /// Sum of increased bonuses as decimals (0.40 = 40%)
    pub increased: f64,
    /// Individual more multipliers as decimals
    pub more: Vec<f64>,
}

impl StatValue {
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Self::default()
        }
    }

    pub fn compute(&self) -> f64 {
        (self.base + self.flat) * (1.0 + self.increased) * self.more_multiplier()
    }

    pub fn add_flat(&mut self, value: f64) {
        self.flat += value;
    }

    pub fn add_increased(&mut self, value: f64) {
        self.increased += value;
    }

    pub fn add_more(&mut self, value: f64) {
        self.more.push(value);
    }

    fn more_multiplier(&self) -> f64 {
        self.more.iter().map(|m| 1.0 + m).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_only() {
        let stat = StatValue::with_base(0.25);
        assert!((stat.compute() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_formula() {
        // (0.1 + 0.2) × (1 + 0.5) × (1.2 × 1.1)
        let mut stat = StatValue::with_base(0.1);
        stat.add_flat(0.2);
        stat.add_increased(0.3);
        stat.add_increased(0.2);
        stat.add_more(0.2);
        stat.add_more(0.1);

        let expected = 0.3 * 1.5 * (1.2 * 1.1);
        assert!((stat.compute() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_negative_flat_can_go_below_zero() {
        // Values are not clamped at source
        let mut stat = StatValue::with_base(0.0);
        stat.add_flat(-0.5);
        assert!((stat.compute() + 0.5).abs() < f64::EPSILON);
    }
}
