//! vitals_core - Health and status effect resolution for game entities
//!
//! This library provides:
//! - AliveEntity: health, damage/heal/kill resolution and death saves
//! - Affinities: damage/heal categories with permission and reaction hooks
//! - Statuses: stackable effects tracked in a per-entity StatusTable
//! - Resistances: per-affinity reduction aggregated from stat modifiers
//! - World/TickSystem: entity store with fixed or per-frame status ticks

pub mod affinity;
pub mod catalog;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod operation;
pub mod persistence;
pub mod prelude;
pub mod presets;
pub mod resistance;
pub mod status;
pub mod tick;
pub mod types;
pub mod world;

// Re-export core types for convenience
pub use affinity::{AffinityRegistry, AffinityType, ConfiguredAffinity};
pub use catalog::{Catalog, CatalogBuilder, CatalogKey};
pub use context::{DamageContext, DeathSaveContext, HealContext, StatusContext};
pub use entity::AliveEntity;
pub use error::{Result, VitalsError};
pub use operation::{OperationResult, ResultDomain};
pub use resistance::{ResistanceCatalog, ResistanceDefinition, ResistanceLookup, StatModifier};
pub use status::{AppliedStatus, ConfiguredStatus, StatusDefinition, StatusRegistry, StatusTable};
pub use tick::{TickAccumulator, TickDriver, TickSystem};
pub use types::{ActionSource, AffinityId, EntityId, Health, ResistanceId, StackCount, StatusFlags, StatusId};
pub use world::World;
