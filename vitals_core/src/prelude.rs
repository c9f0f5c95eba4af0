//! Prelude module for convenient imports
//!
//! ```rust
//! use vitals_core::prelude::*;
//! ```

// Core types
pub use crate::entity::AliveEntity;
pub use crate::types::{ActionSource, AffinityId, EntityId, Health, StackCount, StatusFlags, StatusId};

// Results
pub use crate::operation::{entity as entity_result, status as status_result, OperationResult};

// Hooks
pub use crate::affinity::AffinityType;
pub use crate::context::{DamageContext, DeathSaveContext, HealContext, StatusContext};
pub use crate::status::StatusDefinition;

// Catalog
pub use crate::catalog::{Catalog, CatalogKey};
pub use crate::presets::{BurningStatus, ColdAffinity, FireAffinity};
pub use crate::resistance::{ModifierTarget, StatModifier};

// Driving
pub use crate::tick::TickDriver;
pub use crate::world::World;
