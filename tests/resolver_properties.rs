//! Property checks over the affinity table and the resolver math

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use thornveil::combat::{
    affinity_between, affinity_multiplier, resolver, Affinity, AttackOutcome, BalanceConfig,
    Combatant, DamageType,
};

fn any_damage_type() -> impl Strategy<Value = DamageType> {
    proptest::sample::select(DamageType::ALL.to_vec())
}

fn any_element() -> impl Strategy<Value = DamageType> {
    proptest::sample::select(DamageType::ELEMENTS.to_vec())
}

proptest! {
    #[test]
    fn affinity_table_is_total_and_closed(
        attack in any_damage_type(),
        defender in any_damage_type(),
    ) {
        let mult = affinity_multiplier(attack, defender);
        prop_assert!([0.0, 0.5, 1.0, 1.5, 2.0].contains(&mult));
    }

    #[test]
    fn none_is_the_identity_element(element in any_damage_type()) {
        prop_assert_eq!(affinity_between(DamageType::None, element), Affinity::Neutral);
        prop_assert_eq!(affinity_between(element, DamageType::None), Affinity::Neutral);
    }

    #[test]
    fn elements_never_excel_against_themselves(element in any_element()) {
        let diagonal = affinity_between(element, element);
        prop_assert!(matches!(diagonal, Affinity::Immune | Affinity::Resistant));
    }

    #[test]
    fn crit_chance_monotonic_in_agility(
        low in 0u32..200,
        bump in 1u32..200,
    ) {
        let config = BalanceConfig::default();
        let slower = Combatant::new("Slower", 100, 0, 10, low, 0, 1);
        let faster = Combatant::new("Faster", 100, 0, 10, low + bump, 0, 1);
        prop_assert!(
            resolver::crit_chance(&faster, &config) > resolver::crit_chance(&slower, &config)
        );
    }

    #[test]
    fn dodge_chance_monotonic_and_capped(
        low in 0u32..100_000,
        bump in 0u32..100_000,
    ) {
        let config = BalanceConfig::default();
        let slower = Combatant::new("Slower", 100, 0, 10, low, 0, 1);
        let faster = Combatant::new("Faster", 100, 0, 10, low + bump, 0, 1);
        let slow_chance = resolver::dodge_chance(&slower, &config);
        let fast_chance = resolver::dodge_chance(&faster, &config);
        prop_assert!(fast_chance >= slow_chance);
        prop_assert!(slow_chance <= config.dodge_cap);
        prop_assert!(fast_chance <= config.dodge_cap);
    }

    #[test]
    fn flee_chance_is_a_probability(
        agility in 0u32..10_000,
        player_level in 1u32..100,
        enemy_level in 1u32..100,
    ) {
        let config = BalanceConfig::default();
        let player = Combatant::new("Korra", 100, 0, 10, agility, 0, player_level);
        let pursuer = Combatant::new("Pursuer", 100, 0, 10, 0, 0, enemy_level);
        let chance = resolver::flee_chance(&player, &pursuer, &config);
        prop_assert!((0.0..=1.0).contains(&chance));
    }

    #[test]
    fn dodges_always_deal_zero(seed in any::<u64>(), strength in 1u32..500) {
        let attacker = Combatant::new("Korra", 100, 0, strength, 0, 0, 5);
        let defender = Combatant::test_fighter("Blur");
        let mut config = BalanceConfig::default();
        config.base_dodge_chance = 1.0;
        config.dodge_cap = 1.0;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = resolver::resolve_physical(&attacker, &defender, 0, &config, &mut rng);
        prop_assert_eq!(result.damage, 0);
        prop_assert_eq!(result.outcome, AttackOutcome::Dodged);
        prop_assert!(!result.critical);
    }

    #[test]
    fn physical_damage_stays_inside_the_variance_band(
        seed in any::<u64>(),
        strength in 1u32..1000,
    ) {
        let attacker = Combatant::new("Korra", 100, 0, strength, 0, 0, 5);
        let defender = Combatant::new("Husk", 100, 0, 5, 0, 0, 5);
        let mut config = BalanceConfig::default();
        config.base_crit_chance = 0.0;
        config.agility_crit_scale = 0.0;
        config.base_dodge_chance = 0.0;
        config.agility_dodge_scale = 0.0;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = resolver::resolve_physical(&attacker, &defender, 0, &config, &mut rng);
        let base = strength as f64 * config.strength_damage_scale;
        let floor = (base * config.min_damage_mult).round() as u32;
        let ceil = (base * config.max_damage_mult).round() as u32;
        prop_assert!(result.damage >= floor && result.damage <= ceil);
    }

    #[test]
    fn resolver_is_deterministic_per_seed(seed in any::<u64>()) {
        let attacker = Combatant::test_fighter("Korra");
        let defender = Combatant::test_fighter("Raider");
        let config = BalanceConfig::default();

        let mut a = ChaCha8Rng::seed_from_u64(seed);
        let mut b = ChaCha8Rng::seed_from_u64(seed);
        let left = resolver::resolve_physical(&attacker, &defender, 0, &config, &mut a);
        let right = resolver::resolve_physical(&attacker, &defender, 0, &config, &mut b);
        prop_assert_eq!(left.damage, right.damage);
        prop_assert_eq!(left.critical, right.critical);
        prop_assert_eq!(left.outcome, right.outcome);
        prop_assert_eq!(left.description, right.description);
    }
}
