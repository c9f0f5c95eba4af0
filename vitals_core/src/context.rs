//! Per-call contexts handed to affinity and status hooks
//!
//! Contexts are built for a single call and dropped when it returns.

use crate::affinity::AffinityType;
use crate::entity::AliveEntity;
use crate::error::{Result, VitalsError};
use crate::status::StatusDefinition;
use crate::types::{round_health, AffinityId, EntityId, Health, StackCount};
use std::sync::Arc;

/// Scale a raw amount by resistance: `round(raw * clamp(1 - resistance, 0, 1))`
pub fn apply_resistance(raw_amount: Health, resistance: f32) -> Health {
    let multiplier = (1.0 - f64::from(resistance)).clamp(0.0, 1.0);
    if multiplier.is_nan() {
        return 0;
    }
    if multiplier == 1.0 {
        return raw_amount;
    }
    round_health(raw_amount as f64 * multiplier)
}

/// Context for damage
#[derive(Debug, Clone)]
pub struct DamageContext {
    /// Entity receiving the damage
    pub target: EntityId,
    /// Attacker, if any
    pub source: Option<EntityId>,
    /// Damage affinity, `None` for untyped damage
    pub affinity: Option<Arc<dyn AffinityType>>,
    /// Resistance the target had against the affinity
    pub resistance: f32,
    /// Damage after resistance
    pub amount: Health,
}

impl DamageContext {
    /// Build a damage context, scaling `raw_amount` by `resistance`
    ///
    /// # Panics
    /// Panics if `raw_amount` is negative.
    pub fn new(
        target: EntityId,
        source: Option<EntityId>,
        affinity: Option<Arc<dyn AffinityType>>,
        resistance: f32,
        raw_amount: Health,
    ) -> Self {
        assert!(
            raw_amount >= 0,
            "Amount of damage must be greater than or equal to zero"
        );
        DamageContext {
            target,
            source,
            affinity,
            resistance,
            amount: apply_resistance(raw_amount, resistance),
        }
    }

    /// Like [`DamageContext::new`] but rejects negative amounts with an error
    pub fn try_new(
        target: EntityId,
        source: Option<EntityId>,
        affinity: Option<Arc<dyn AffinityType>>,
        resistance: f32,
        raw_amount: Health,
    ) -> Result<Self> {
        if raw_amount < 0 {
            return Err(VitalsError::NegativeAmount(raw_amount));
        }
        Ok(Self::new(target, source, affinity, resistance, raw_amount))
    }

    /// Damage without affinity and without resistance
    pub fn untyped(target: EntityId, source: Option<EntityId>, amount: Health) -> Self {
        Self::new(target, source, None, 0.0, amount)
    }

    pub fn affinity_id(&self) -> Option<AffinityId> {
        self.affinity.as_ref().map(|a| a.id())
    }
}

/// Context for healing
#[derive(Debug, Clone)]
pub struct HealContext {
    /// Entity receiving the healing
    pub target: EntityId,
    /// Healer, if any
    pub source: Option<EntityId>,
    /// Healing affinity, `None` for untyped healing
    pub affinity: Option<Arc<dyn AffinityType>>,
    /// Resistance the target had against the affinity
    pub resistance: f32,
    /// Healing after resistance
    pub amount: Health,
}

impl HealContext {
    /// Build a heal context, scaling `raw_amount` by `resistance`
    ///
    /// # Panics
    /// Panics if `raw_amount` is negative.
    pub fn new(
        target: EntityId,
        source: Option<EntityId>,
        affinity: Option<Arc<dyn AffinityType>>,
        resistance: f32,
        raw_amount: Health,
    ) -> Self {
        assert!(
            raw_amount >= 0,
            "Amount of healing must be greater than or equal to zero"
        );
        HealContext {
            target,
            source,
            affinity,
            resistance,
            amount: apply_resistance(raw_amount, resistance),
        }
    }

    /// Like [`HealContext::new`] but rejects negative amounts with an error
    pub fn try_new(
        target: EntityId,
        source: Option<EntityId>,
        affinity: Option<Arc<dyn AffinityType>>,
        resistance: f32,
        raw_amount: Health,
    ) -> Result<Self> {
        if raw_amount < 0 {
            return Err(VitalsError::NegativeAmount(raw_amount));
        }
        Ok(Self::new(target, source, affinity, resistance, raw_amount))
    }

    pub fn untyped(target: EntityId, source: Option<EntityId>, amount: Health) -> Self {
        Self::new(target, source, None, 0.0, amount)
    }

    pub fn affinity_id(&self) -> Option<AffinityId> {
        self.affinity.as_ref().map(|a| a.id())
    }
}

/// Decision of an affinity's death save hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeathSaveContext {
    pub should_be_saved: bool,
    /// Health the entity is left with when saved
    pub health_to_set: Health,
}

impl DeathSaveContext {
    pub fn new(should_be_saved: bool, health_to_set: Health) -> Self {
        DeathSaveContext {
            should_be_saved,
            health_to_set,
        }
    }

    /// Never save
    pub fn none() -> Self {
        Self::default()
    }

    pub fn save_at(health_to_set: Health) -> Self {
        Self::new(true, health_to_set)
    }
}

/// Context shared by every status event
///
/// `stack_count` is the absolute stack count for apply, remove, tick and
/// failure events. For stack changed events it is the signed change.
#[derive(Debug)]
pub struct StatusContext<'a> {
    pub entity: &'a mut AliveEntity,
    pub status: Arc<dyn StatusDefinition>,
    pub stack_count: StackCount,
    /// Tick damage owed from earlier ticks, written back after a tick pass
    pub damage_carry: f64,
}

impl<'a> StatusContext<'a> {
    pub fn new(
        entity: &'a mut AliveEntity,
        status: Arc<dyn StatusDefinition>,
        stack_count: StackCount,
    ) -> Self {
        StatusContext {
            entity,
            status,
            stack_count,
            damage_carry: 0.0,
        }
    }

    /// Add `exact` damage to the carry and take out its whole part
    ///
    /// The fraction stays in the carry for the next tick, so damage over time
    /// does not depend on how finely time is sliced.
    pub fn accrue_damage(&mut self, exact: f64) -> Health {
        if !exact.is_finite() || exact <= 0.0 {
            return 0;
        }
        let total = self.damage_carry + exact;
        let whole = total.floor();
        self.damage_carry = total - whole;
        whole as Health
    }
}
