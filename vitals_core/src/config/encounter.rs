//! Encounter configuration for scripted simulations

use super::ConfigError;
use crate::resistance::{ModifierKind, ModifierTarget, StatModifier};
use crate::types::{AffinityId, EntityId, Health, ResistanceId, StackCount, StatusId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A scripted encounter: entities and the actions performed on them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Simulated seconds
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Seconds per simulated frame
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    /// Seed for damage variance rolls
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
    #[serde(default)]
    pub hits: Vec<HitConfig>,
}

fn default_duration() -> f32 {
    10.0
}

fn default_frame_time() -> f32 {
    0.1
}

fn default_stacks() -> StackCount {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    pub id: EntityId,
    pub max_health: Health,
    /// Fixed tick step in seconds, ticks every frame when unset
    #[serde(default)]
    pub tick_interval: Option<f32>,
    #[serde(default)]
    pub modifiers: Vec<ModifierConfig>,
}

/// Resistance modifier, targets every resistance when `resistance` is unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierConfig {
    #[serde(default)]
    pub resistance: Option<ResistanceId>,
    pub kind: ModifierKind,
    pub value: f64,
}

impl ModifierConfig {
    pub fn to_modifier(&self) -> StatModifier {
        let target = match &self.resistance {
            Some(id) => ModifierTarget::Resistance(id.clone()),
            None => ModifierTarget::AllResistances,
        };
        StatModifier::new(target, self.kind, self.value)
    }
}

/// One scripted action at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitConfig {
    /// Seconds since the start of the encounter
    pub at: f32,
    pub target: EntityId,
    #[serde(default)]
    pub source: Option<EntityId>,
    pub action: HitAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitAction {
    Damage {
        #[serde(default)]
        affinity: Option<AffinityId>,
        amount: Health,
        /// Random spread applied to `amount`, as a fraction (0.1 = ±10%)
        #[serde(default)]
        variance: f64,
    },
    Heal {
        #[serde(default)]
        affinity: Option<AffinityId>,
        amount: Health,
    },
    ApplyStatus {
        status: StatusId,
        #[serde(default = "default_stacks")]
        stacks: StackCount,
    },
    RemoveStatus {
        status: StatusId,
        #[serde(default = "default_stacks")]
        stacks: StackCount,
        /// Ignore conditions and stack limits
        #[serde(default)]
        force: bool,
    },
    Kill,
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.frame_time) {
            return Err(ConfigError::ValidationError("frame_time must be positive".to_string()));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ConfigError::ValidationError("duration must not be negative".to_string()));
        }

        let mut ids = HashSet::new();
        for entity in &self.entities {
            if !ids.insert(&entity.id) {
                return Err(ConfigError::ValidationError(format!("duplicate entity '{}'", entity.id)));
            }
            if entity.max_health <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "entity '{}' must have positive max_health",
                    entity.id
                )));
            }
            if matches!(entity.tick_interval, Some(interval) if !is_positive(interval)) {
                return Err(ConfigError::ValidationError(format!(
                    "entity '{}' must have a positive tick_interval",
                    entity.id
                )));
            }
            if entity.modifiers.iter().any(|m| !m.value.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "entity '{}' has a non-finite modifier value",
                    entity.id
                )));
            }
        }

        for hit in &self.hits {
            if !hit.at.is_finite() || hit.at < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "hit on '{}' must happen at a non-negative time",
                    hit.target
                )));
            }
            if !ids.contains(&hit.target) {
                return Err(ConfigError::ValidationError(format!(
                    "hit at {}s targets unknown entity '{}'",
                    hit.at, hit.target
                )));
            }
            let invalid = match &hit.action {
                HitAction::Damage { amount, variance, .. } => {
                    *amount < 0 || !variance.is_finite() || *variance < 0.0
                }
                HitAction::Heal { amount, .. } => *amount < 0,
                HitAction::ApplyStatus { stacks, .. } | HitAction::RemoveStatus { stacks, .. } => *stacks <= 0,
                HitAction::Kill => false,
            };
            if invalid {
                return Err(ConfigError::ValidationError(format!(
                    "hit at {}s on '{}' has an invalid amount",
                    hit.at, hit.target
                )));
            }
        }

        Ok(())
    }
}

/// Finite and greater than zero
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Load an encounter from a TOML file
pub fn load_encounter(path: &Path) -> Result<EncounterConfig, ConfigError> {
    let config: EncounterConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Load an encounter from a TOML string
pub fn parse_encounter(content: &str) -> Result<EncounterConfig, ConfigError> {
    let config: EncounterConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config)
}
