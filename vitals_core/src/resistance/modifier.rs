//! StatModifier - modifiers an entity registers against resistances

use super::StatValue;
use crate::types::ResistanceId;
use serde::{Deserialize, Serialize};

/// Which resistance a modifier affects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierTarget {
    Resistance(ResistanceId),
    /// Every registered resistance
    AllResistances,
}

impl ModifierTarget {
    pub fn resistance(id: impl Into<ResistanceId>) -> Self {
        ModifierTarget::Resistance(id.into())
    }
}

/// How a modifier combines with the stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Flat,
    Increased,
    More,
}

/// A stat modifier registered on an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub target: ModifierTarget,
    pub kind: ModifierKind,
    pub value: f64,
}

impl StatModifier {
    pub fn new(target: ModifierTarget, kind: ModifierKind, value: f64) -> Self {
        StatModifier { target, kind, value }
    }

    pub fn flat(target: ModifierTarget, value: f64) -> Self {
        Self::new(target, ModifierKind::Flat, value)
    }

    pub fn increased(target: ModifierTarget, value: f64) -> Self {
        Self::new(target, ModifierKind::Increased, value)
    }

    pub fn more(target: ModifierTarget, value: f64) -> Self {
        Self::new(target, ModifierKind::More, value)
    }

    pub fn applies_to(&self, resistance: &ResistanceId) -> bool {
        match &self.target {
            ModifierTarget::Resistance(id) => id == resistance,
            ModifierTarget::AllResistances => true,
        }
    }

    pub fn apply_to(&self, stat: &mut StatValue) {
        match self.kind {
            ModifierKind::Flat => stat.add_flat(self.value),
            ModifierKind::Increased => stat.add_increased(self.value),
            ModifierKind::More => stat.add_more(self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_to() {
        let fire = StatModifier::flat(ModifierTarget::resistance("fire_resistance"), 0.5);
        assert!(fire.applies_to(&"fire_resistance".into()));
        assert!(!fire.applies_to(&"cold_resistance".into()));

        let all = StatModifier::flat(ModifierTarget::AllResistances, 0.5);
        assert!(all.applies_to(&"cold_resistance".into()));
    }

    #[test]
    fn test_parse_from_toml() {
        let toml = r#"
kind = "increased"
value = 0.25
target = { resistance = "fire_resistance" }
"#;
        let modifier: StatModifier = toml::from_str(toml).unwrap();
        assert_eq!(modifier.kind, ModifierKind::Increased);
        assert_eq!(modifier.target, ModifierTarget::resistance("fire_resistance"));
    }
}
