//! Catalog configuration - affinities, statuses and resistances defined in TOML

use super::ConfigError;
use crate::types::{AffinityId, Health, ResistanceId, StackCount, StatusId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for catalog entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub affinities: Vec<AffinityConfig>,
    #[serde(default)]
    pub statuses: Vec<StatusConfig>,
    #[serde(default)]
    pub resistances: Vec<ResistanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityConfig {
    pub id: AffinityId,
    pub name: String,
    #[serde(default = "default_true")]
    pub damageable: bool,
    #[serde(default = "default_true")]
    pub healable: bool,
    /// Health to restore instead of dying
    #[serde(default)]
    pub save_from_death_at: Option<Health>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    pub id: StatusId,
    pub name: String,
    /// Zero or negative for unlimited
    #[serde(default = "default_max_stack")]
    pub max_stack: StackCount,
    #[serde(default = "default_true")]
    pub removable: bool,
    /// Damage per second per stack
    #[serde(default)]
    pub damage_per_second: f64,
    #[serde(default)]
    pub tick_affinity: Option<AffinityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResistanceConfig {
    pub id: ResistanceId,
    pub name: String,
    #[serde(default)]
    pub base: f64,
    pub applies_to: Vec<AffinityId>,
}

fn default_true() -> bool {
    true
}

fn default_max_stack() -> StackCount {
    1
}

impl CatalogConfig {
    /// Check ids are unique and every affinity reference resolves
    ///
    /// `is_known_affinity` covers affinities registered outside this config.
    pub fn validate(&self, is_known_affinity: impl Fn(&AffinityId) -> bool) -> Result<(), ConfigError> {
        let mut affinities = HashSet::new();
        for affinity in &self.affinities {
            if !affinities.insert(&affinity.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate affinity '{}'",
                    affinity.id
                )));
            }
        }

        let known = |id: &AffinityId| affinities.contains(id) || is_known_affinity(id);

        let mut statuses = HashSet::new();
        for status in &self.statuses {
            if !statuses.insert(&status.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate status '{}'",
                    status.id
                )));
            }
            if status.damage_per_second < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "status '{}' has negative damage_per_second",
                    status.id
                )));
            }
            if let Some(affinity) = &status.tick_affinity {
                if !known(affinity) {
                    return Err(ConfigError::ValidationError(format!(
                        "status '{}' ticks with unknown affinity '{}'",
                        status.id, affinity
                    )));
                }
            }
        }

        let mut resistances = HashSet::new();
        for resistance in &self.resistances {
            if !resistances.insert(&resistance.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate resistance '{}'",
                    resistance.id
                )));
            }
            if let Some(affinity) = resistance.applies_to.iter().find(|a| !known(a)) {
                return Err(ConfigError::ValidationError(format!(
                    "resistance '{}' applies to unknown affinity '{}'",
                    resistance.id, affinity
                )));
            }
        }

        Ok(())
    }
}

/// Load catalog configuration from a TOML file
pub fn load_catalog_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    super::load_toml(path)
}

/// Load catalog configuration from a TOML string
pub fn parse_catalog_config(content: &str) -> Result<CatalogConfig, ConfigError> {
    super::parse_toml(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[[affinities]]
id = "holy"
name = "Holy"
save_from_death_at = 1

[[affinities]]
id = "void"
name = "Void"
healable = false

[[statuses]]
id = "poisoned"
name = "Poisoned"
max_stack = -1
damage_per_second = 2.0

[[statuses]]
id = "cursed"
name = "Cursed"
removable = false

[[resistances]]
id = "holy_resistance"
name = "Holy Resistance"
applies_to = ["holy"]
"#;

    #[test]
    fn test_parse_catalog() {
        let config = parse_catalog_config(CATALOG).unwrap();
        assert_eq!(config.affinities.len(), 2);
        assert_eq!(config.affinities[0].save_from_death_at, Some(1));
        assert!(config.affinities[0].damageable);
        assert!(!config.affinities[1].healable);

        let cursed = &config.statuses[1];
        assert_eq!(cursed.max_stack, 1);
        assert!(!cursed.removable);
        assert!((config.statuses[0].damage_per_second - 2.0).abs() < f64::EPSILON);

        assert!(config.validate(|_| false).is_ok());
    }

    #[test]
    fn test_unknown_affinity_rejected() {
        let toml = r#"
[[resistances]]
id = "fire_resistance"
name = "Fire Resistance"
applies_to = ["fire"]
"#;
        let config = parse_catalog_config(toml).unwrap();
        assert!(matches!(
            config.validate(|_| false),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(config.validate(|id| id.as_str() == "fire").is_ok());
    }

    #[test]
    fn test_duplicate_status_rejected() {
        let toml = r#"
[[statuses]]
id = "slow"
name = "Slow"

[[statuses]]
id = "slow"
name = "Slow again"
"#;
        let config = parse_catalog_config(toml).unwrap();
        assert!(config.validate(|_| true).is_err());
    }

    #[test]
    fn test_embedded_default_catalog_is_valid() {
        let config = parse_catalog_config(include_str!("../../config/catalog.toml")).unwrap();
        assert!(config.validate(|id| id.as_str() == "fire" || id.as_str() == "cold").is_ok());
    }
}
