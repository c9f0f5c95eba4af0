//! Catalog - shared affinities, statuses and resistance lookup
//!
//! One catalog is shared by every entity of a world. Entries are resolved by
//! id, or by type through [`CatalogKey`] for compile-time presets.

use crate::affinity::{AffinityRegistry, AffinityType, ConfiguredAffinity};
use crate::config::{parse_catalog_config, CatalogConfig, ConfigError};
use crate::presets;
use crate::resistance::{ResistanceCatalog, ResistanceDefinition, ResistanceLookup};
use crate::status::{ConfiguredStatus, StatusDefinition, StatusRegistry};
use crate::types::{AffinityId, StatusId};
use std::sync::Arc;

/// Catalog bundled with the crate, layered over the code presets
const DEFAULT_CATALOG: &str = include_str!("../config/catalog.toml");

/// Static id of a catalog entry, for typed lookups
pub trait CatalogKey {
    const ID: &'static str;
}

#[derive(Debug, Clone)]
pub struct Catalog {
    affinities: AffinityRegistry,
    statuses: StatusRegistry,
    resistances: Arc<dyn ResistanceLookup>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            affinities: AffinityRegistry::new(),
            statuses: StatusRegistry::new(),
            resistances: Arc::new(ResistanceCatalog::new()),
        }
    }
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Catalog with only the code presets (fire, cold, burning)
    pub fn with_presets() -> Self {
        Self::builder().presets().build()
    }

    /// Catalog with only the entries of `config`
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self::builder().config(config)?.build())
    }

    /// Code presets plus the bundled `config/catalog.toml`
    pub fn default_catalog() -> Result<Self, ConfigError> {
        let config = parse_catalog_config(DEFAULT_CATALOG)?;
        Ok(Self::builder().presets().config(&config)?.build())
    }

    pub fn affinities(&self) -> &AffinityRegistry {
        &self.affinities
    }

    pub fn statuses(&self) -> &StatusRegistry {
        &self.statuses
    }

    pub fn resistances(&self) -> &dyn ResistanceLookup {
        self.resistances.as_ref()
    }

    pub fn affinity(&self, id: &AffinityId) -> Option<Arc<dyn AffinityType>> {
        self.affinities.get(id)
    }

    pub fn status(&self, id: &StatusId) -> Option<Arc<dyn StatusDefinition>> {
        self.statuses.get(id)
    }

    pub fn affinity_typed<A: CatalogKey>(&self) -> Option<Arc<dyn AffinityType>> {
        self.affinity(&AffinityId::from(A::ID))
    }

    pub fn status_typed<S: CatalogKey>(&self) -> Option<Arc<dyn StatusDefinition>> {
        self.status(&StatusId::from(S::ID))
    }
}

/// Builder for [`Catalog`]
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    affinities: AffinityRegistry,
    statuses: StatusRegistry,
    resistances: ResistanceCatalog,
    lookup: Option<Arc<dyn ResistanceLookup>>,
}

impl CatalogBuilder {
    pub fn affinity(mut self, affinity: impl AffinityType + 'static) -> Self {
        self.affinities.register(Arc::new(affinity));
        self
    }

    pub fn status(mut self, status: impl StatusDefinition + 'static) -> Self {
        self.statuses.register(Arc::new(status));
        self
    }

    pub fn resistance(mut self, definition: ResistanceDefinition) -> Self {
        self.resistances.register(definition);
        self
    }

    /// Replace resistance aggregation with a custom lookup
    ///
    /// Registered resistance definitions are ignored once a lookup is set.
    pub fn resistance_lookup(mut self, lookup: Arc<dyn ResistanceLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Register the code presets
    pub fn presets(self) -> Self {
        self.affinity(presets::FireAffinity)
            .affinity(presets::ColdAffinity)
            .status(presets::BurningStatus)
            .resistance(presets::fire_resistance())
            .resistance(presets::cold_resistance())
    }

    /// Register every entry of a validated config
    ///
    /// Config entries replace already registered entries with the same id.
    pub fn config(mut self, config: &CatalogConfig) -> Result<Self, ConfigError> {
        config.validate(|id| self.affinities.contains(id))?;

        for affinity in &config.affinities {
            self.affinities
                .register(Arc::new(ConfiguredAffinity::from_config(affinity)));
        }
        for status in &config.statuses {
            self.statuses
                .register(Arc::new(ConfiguredStatus::from_config(status)));
        }
        for resistance in &config.resistances {
            self.resistances
                .register(ResistanceDefinition::from_config(resistance));
        }

        tracing::debug!(
            affinities = config.affinities.len(),
            statuses = config.statuses.len(),
            resistances = config.resistances.len(),
            "catalog config registered"
        );
        Ok(self)
    }

    pub fn build(self) -> Catalog {
        let resistances = match self.lookup {
            Some(lookup) => lookup,
            None => Arc::new(self.resistances) as Arc<dyn ResistanceLookup>,
        };
        Catalog {
            affinities: self.affinities,
            statuses: self.statuses,
            resistances,
        }
    }
}
