//! Property tests for health bounds and stack limits

use proptest::prelude::*;
use std::sync::Arc;
use vitals_core::operation::status;
use vitals_core::prelude::*;
use vitals_core::ConfiguredStatus;

#[derive(Debug, Clone)]
enum Op {
    Damage(Health),
    Heal(Health),
    Fire(Health),
    Kill,
    SetMax(Health),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..500i64).prop_map(Op::Damage),
        (0..500i64).prop_map(Op::Heal),
        (0..500i64).prop_map(Op::Fire),
        Just(Op::Kill),
        (0..1000i64).prop_map(Op::SetMax),
    ]
}

proptest! {
    #[test]
    fn health_stays_within_bounds(
        max_health in 0..1000i64,
        resistance in -1.0f64..2.0,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut entity = AliveEntity::new("subject", max_health, Arc::new(Catalog::with_presets()));
        entity.add_modifier(StatModifier::flat(ModifierTarget::resistance("fire_resistance"), resistance));

        for op in ops {
            match op {
                Op::Damage(amount) => { entity.damage_untyped(None, amount, ActionSource::External); }
                Op::Heal(amount) => { entity.heal_untyped(None, amount, ActionSource::External); }
                Op::Fire(amount) => { entity.damage_typed::<FireAffinity>(None, amount, ActionSource::External); }
                Op::Kill => {
                    let context = DamageContext::untyped(entity.id().clone(), None, 0);
                    entity.kill(&context, ActionSource::External, None);
                }
                Op::SetMax(max) => entity.set_max_health(max),
            }
            prop_assert!(entity.current_health() >= 0);
            prop_assert!(entity.current_health() <= entity.max_health());
        }
    }

    #[test]
    fn non_lethal_damage_is_undone_by_equal_heal(
        max_health in 1..1000i64,
        amount in 0..1000i64,
    ) {
        prop_assume!(amount < max_health);
        let mut entity = AliveEntity::new("subject", max_health, Arc::new(Catalog::with_presets()));

        let damage = entity.damage_untyped(None, amount, ActionSource::External);
        prop_assert_eq!(damage.data, amount);
        entity.heal_untyped(None, damage.data, ActionSource::External);
        prop_assert_eq!(entity.current_health(), max_health);
    }

    #[test]
    fn stacks_never_exceed_positive_max(
        max_stack in 1..10i32,
        requests in prop::collection::vec((1..6i32, any::<bool>()), 1..30),
    ) {
        let catalog = Catalog::builder()
            .status(ConfiguredStatus::new("stacking", "Stacking", max_stack))
            .build();
        let catalog = Arc::new(catalog);
        let stacking = catalog.status(&"stacking".into()).unwrap();
        let mut entity = AliveEntity::new("subject", 10, catalog);

        for (count, ignore_limit) in requests {
            let before = entity.status_stack_count(&stacking);
            let flags = if ignore_limit { StatusFlags::IGNORE_STACK_LIMIT } else { StatusFlags::empty() };
            let result = entity.apply_status(&stacking, count, flags, ActionSource::External);

            let after = entity.status_stack_count(&stacking);
            prop_assert!(after <= max_stack);
            if before == max_stack && !ignore_limit {
                prop_assert!(result.is_similar(&status::max_stack_reached(0)));
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn removing_too_many_stacks(
        applied in 1..20i32,
        requested in 1..40i32,
    ) {
        let catalog = Arc::new(
            Catalog::builder()
                .status(ConfiguredStatus::new("unlimited", "Unlimited", 0))
                .build(),
        );
        let unlimited = catalog.status(&"unlimited".into()).unwrap();
        let mut entity = AliveEntity::new("subject", 10, catalog);
        entity.apply_status(&unlimited, applied, StatusFlags::empty(), ActionSource::Internal);

        let result = entity.remove_status(&unlimited, requested, StatusFlags::empty(), ActionSource::Internal);
        if requested > applied {
            prop_assert!(result.is_similar(&status::not_enough_stacks(0)));
            prop_assert_eq!(entity.status_stack_count(&unlimited), applied);

            let forced = entity.remove_status(&unlimited, requested, StatusFlags::IGNORE_STACK_LIMIT, ActionSource::Internal);
            prop_assert!(forced.is_similar(&status::removed()));
        }
        prop_assert_eq!(entity.status_stack_count(&unlimited), (applied - requested).max(0));
    }
}
