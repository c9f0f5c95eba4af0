//! Encounter simulation utilities

use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};
use vitals_core::config::{EncounterConfig, HitAction, HitConfig};
use vitals_core::operation::entity;
use vitals_core::{ActionSource, AliveEntity, Catalog, DamageContext, EntityId, Health, StatusFlags, World};

/// Build a world with every entity of an encounter spawned and active
pub fn build_world(config: &EncounterConfig, catalog: Arc<Catalog>) -> World {
    let mut world = World::new(catalog);
    for spawn in &config.entities {
        let mut entity = AliveEntity::new(spawn.id.clone(), spawn.max_health, Arc::clone(world.catalog()));
        if let Some(interval) = spawn.tick_interval {
            entity = entity.with_tick_interval(interval);
        }
        for modifier in &spawn.modifiers {
            entity.add_modifier(modifier.to_modifier());
        }
        world.insert(entity);
    }
    world
}

/// Outcome of a scripted encounter
#[derive(Debug, Default)]
pub struct EncounterSimulation {
    pub frames: u32,
    pub tick_passes: usize,
    pub hits_resolved: u32,
    /// Hits rejected by a permission hook or a status rule
    pub hits_rejected: u32,
    pub total_damage: Health,
    pub total_healing: Health,
    pub saves: u32,
    /// Entities and the time they died at
    pub deaths: Vec<(EntityId, f32)>,
    pub total_time: f32,
}

impl EncounterSimulation {
    /// Run the encounter's hits and status ticks for its duration
    pub fn run(world: &mut World, config: &EncounterConfig, rng: &mut impl Rng) -> Self {
        let mut result = EncounterSimulation::default();

        let mut hits: Vec<&HitConfig> = config.hits.iter().collect();
        hits.sort_by(|a, b| a.at.total_cmp(&b.at));
        let mut next_hit = 0;

        let mut time = 0.0f32;
        while time < config.duration {
            let frame_end = time + config.frame_time;

            while next_hit < hits.len() && hits[next_hit].at < frame_end {
                result.resolve_hit(world, hits[next_hit], rng);
                next_hit += 1;
            }

            let alive_before = alive_ids(world);
            let health_before = total_health(world);
            result.tick_passes += world.update(config.frame_time);
            result.total_damage += (health_before - total_health(world)).max(0);

            time = frame_end;
            result.frames += 1;
            result.record_deaths(world, &alive_before, time);
        }

        result.total_time = time.min(config.duration);
        result
    }

    fn resolve_hit(&mut self, world: &mut World, hit: &HitConfig, rng: &mut impl Rng) {
        let Some(target) = world.get_mut(&hit.target) else {
            warn!(entity = %hit.target, "hit targets a despawned entity");
            return;
        };
        let was_alive = target.is_alive();
        let health_before = target.current_health();
        let source = hit.source.clone();

        let success = match &hit.action {
            HitAction::Damage {
                affinity,
                amount,
                variance,
            } => {
                let amount = roll(*amount, *variance, rng);
                let result = match affinity {
                    Some(affinity) => target.damage_with(affinity, source, amount, ActionSource::External),
                    None => target.damage_untyped(source, amount, ActionSource::External),
                };
                if result.is_similar(&entity::saved_from_death(0)) {
                    self.saves += 1;
                    self.total_damage += (health_before - target.current_health()).max(0);
                } else if result.is_success() {
                    self.total_damage += result.data;
                }
                result.is_success()
            }
            HitAction::Heal { affinity, amount } => {
                let result = match affinity {
                    Some(affinity) => target.heal_with(affinity, source, *amount, ActionSource::External),
                    None => target.heal_untyped(source, *amount, ActionSource::External),
                };
                self.total_healing += if result.is_success() { result.data } else { 0 };
                result.is_success()
            }
            HitAction::ApplyStatus { status, stacks } => target
                .apply_status_by_id(status, *stacks, StatusFlags::empty(), ActionSource::External)
                .is_success(),
            HitAction::RemoveStatus { status, stacks, force } => {
                let flags = if *force {
                    StatusFlags::IGNORE_CONDITIONS | StatusFlags::IGNORE_STACK_LIMIT
                } else {
                    StatusFlags::empty()
                };
                target
                    .remove_status_by_id(status, *stacks, flags, ActionSource::External)
                    .is_success()
            }
            HitAction::Kill => {
                let context = DamageContext::untyped(target.id().clone(), source, 0);
                let result = target.kill(&context, ActionSource::External, None);
                if result.is_similar(&entity::saved_from_death(0)) {
                    self.saves += 1;
                    self.total_damage += (health_before - target.current_health()).max(0);
                }
                result.is_success()
            }
        };

        debug!(entity = %hit.target, at = hit.at, action = ?hit.action, success, "hit resolved");
        if success {
            self.hits_resolved += 1;
        } else {
            self.hits_rejected += 1;
        }
        if was_alive && !target.is_alive() {
            self.deaths.push((hit.target.clone(), hit.at));
        }
    }

    fn record_deaths(&mut self, world: &World, alive_before: &[EntityId], time: f32) {
        for id in alive_before {
            if world.get(id).is_some_and(|e| !e.is_alive()) {
                self.deaths.push((id.clone(), time));
            }
        }
    }

    /// Damage per simulated second
    pub fn dps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.total_damage as f64 / f64::from(self.total_time)
        } else {
            0.0
        }
    }

    /// Share of hits that went through, in percent
    pub fn success_rate(&self) -> f64 {
        let total = self.hits_resolved + self.hits_rejected;
        if total > 0 {
            f64::from(self.hits_resolved) / f64::from(total) * 100.0
        } else {
            0.0
        }
    }
}

/// Spread `amount` by up to ±`variance`
fn roll(amount: Health, variance: f64, rng: &mut impl Rng) -> Health {
    if variance <= 0.0 {
        return amount;
    }
    let factor = 1.0 + rng.gen_range(-variance..=variance);
    ((amount as f64 * factor).round() as Health).max(0)
}

fn alive_ids(world: &World) -> Vec<EntityId> {
    world
        .entities()
        .filter(|e| e.is_alive())
        .map(|e| e.id().clone())
        .collect()
}

fn total_health(world: &World) -> Health {
    world.entities().map(|e| e.current_health()).sum()
}
