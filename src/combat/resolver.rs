//! Probability and damage resolution
//!
//! Pure functions over two combatants, the balance config, and an injected
//! RNG. Nothing in here mutates state or touches a global random source;
//! applying damage is the encounter's job.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::affinity::affinity_multiplier;
use crate::combat::combatant::{Ability, Combatant, MagicSchool};
use crate::combat::config::BalanceConfig;
use crate::combat::damage_type::DamageType;

/// How an attack landed. Keeps a dodge-zero distinguishable from an
/// immunity-zero without comparing description strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    Hit,
    Dodged,
    /// Defender is immune to the attack element
    NoEffect,
}

/// Result of a single resolved attack. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatResult {
    pub damage: u32,
    pub critical: bool,
    pub damage_type: DamageType,
    pub outcome: AttackOutcome,
    pub description: String,
}

/// Result of a flee attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleeAttempt {
    pub success: bool,
    pub chance: f64,
    pub description: String,
}

/// Crit probability for an attacker. Uncapped; the roll compares against a
/// uniform draw, so a sum past 1.0 degrades to certainty rather than panicking.
pub fn crit_chance(attacker: &Combatant, config: &BalanceConfig) -> f64 {
    config.base_crit_chance + attacker.agility as f64 * config.agility_crit_scale
}

/// Dodge probability for a defender, capped at `dodge_cap`.
pub fn dodge_chance(defender: &Combatant, config: &BalanceConfig) -> f64 {
    (config.base_dodge_chance + defender.agility as f64 * config.agility_dodge_scale)
        .clamp(0.0, config.dodge_cap)
}

/// Flee probability against a pursuer. Level disadvantage is penalized,
/// level advantage is not rewarded.
pub fn flee_chance(player: &Combatant, pursuer: &Combatant, config: &BalanceConfig) -> f64 {
    let level_gap = pursuer.level.saturating_sub(player.level) as f64;
    (config.base_flee_chance + player.agility as f64 * config.agility_flee_scale
        - level_gap * config.level_flee_penalty)
        .clamp(0.0, 1.0)
}

/// Base damage for a plain physical strike. Isolated so balance work swaps
/// one formula, not the pipeline.
fn physical_base(attacker: &Combatant, config: &BalanceConfig) -> f64 {
    attacker.strength as f64 * config.strength_damage_scale
}

/// Base damage for a magic ability before the affinity lookup.
fn magic_base(attacker: &Combatant, ability: &Ability, config: &BalanceConfig) -> f64 {
    attacker.magic_power as f64 * config.school_multiplier(ability.school)
}

/// Resolve a plain physical attack.
///
/// Physical strikes carry `DamageType::None`, the identity element, so the
/// affinity step is a no-op and the pipeline stays uniform with magic.
pub fn resolve_physical(
    attacker: &Combatant,
    defender: &Combatant,
    combo_hits: u32,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    run_pipeline(
        attacker,
        defender,
        physical_base(attacker, config),
        DamageType::None,
        None,
        combo_hits,
        config,
        rng,
    )
}

/// Resolve a magic attack with the given ability.
///
/// Identical dodge/variance/crit pipeline as physical, but the base scales
/// from magic power and the school multiplier, and the result is further
/// scaled by the elemental affinity between the ability's element and the
/// defender's alignment. A 0.0 multiplier still succeeds: damage 0,
/// outcome `NoEffect`.
pub fn resolve_magic(
    attacker: &Combatant,
    defender: &Combatant,
    ability: &Ability,
    combo_hits: u32,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    run_pipeline(
        attacker,
        defender,
        magic_base(attacker, ability, config),
        ability.damage_type,
        Some(ability.name.as_str()),
        combo_hits,
        config,
        rng,
    )
}

/// Resolve a healing ability cast on the caster. No dodge, no affinity, no
/// combo; crits become critical heals. The returned damage is the amount
/// restored, for the encounter to apply.
pub fn resolve_healing(
    caster: &Combatant,
    ability: &Ability,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    debug_assert_eq!(ability.school, MagicSchool::Healing);
    let mut amount = magic_base(caster, ability, config);
    amount *= rng.gen_range(config.min_damage_mult..=config.max_damage_mult);
    let critical = rng.gen::<f64>() < crit_chance(caster, config);
    if critical {
        amount *= config.critical_multiplier;
    }
    let amount = amount.round().max(0.0) as u32;

    let description = if critical {
        format!(
            "{}'s {} surges, restoring {} health!",
            caster.name, ability.name, amount
        )
    } else {
        format!(
            "{}'s {} restores {} health",
            caster.name, ability.name, amount
        )
    };
    CombatResult {
        damage: amount,
        critical,
        damage_type: ability.damage_type,
        outcome: AttackOutcome::Hit,
        description,
    }
}

/// Resolve a flee attempt against the pursuing enemy.
pub fn resolve_flee(
    player: &Combatant,
    pursuer: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> FleeAttempt {
    let chance = flee_chance(player, pursuer, config);
    let success = rng.gen::<f64>() < chance;
    let description = if success {
        format!("{} escapes from the fight", player.name)
    } else {
        format!("{} fails to escape - {} blocks the way", player.name, pursuer.name)
    };
    FleeAttempt {
        success,
        chance,
        description,
    }
}

/// Shared attack pipeline: dodge, affinity, variance, crit, combo, guard.
#[allow(clippy::too_many_arguments)]
fn run_pipeline(
    attacker: &Combatant,
    defender: &Combatant,
    base: f64,
    damage_type: DamageType,
    ability_name: Option<&str>,
    combo_hits: u32,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    let attack_label = match ability_name {
        Some(name) => format!("{}'s {}", attacker.name, name),
        None => format!("{}'s attack", attacker.name),
    };

    // 1. Dodge
    if rng.gen::<f64>() < dodge_chance(defender, config) {
        return CombatResult {
            damage: 0,
            critical: false,
            damage_type,
            outcome: AttackOutcome::Dodged,
            description: format!("{} dodged {}", defender.name, attack_label),
        };
    }

    // 2. Affinity - total immunity short-circuits, distinct from a dodge
    let affinity = affinity_multiplier(damage_type, defender.affinity);
    if affinity == 0.0 {
        return CombatResult {
            damage: 0,
            critical: false,
            damage_type,
            outcome: AttackOutcome::NoEffect,
            description: format!("{} has no effect on {}", attack_label, defender.name),
        };
    }

    // 3. Variance, crit, combo, guard
    let mut damage = base * affinity;
    damage *= rng.gen_range(config.min_damage_mult..=config.max_damage_mult);

    let critical = rng.gen::<f64>() < crit_chance(attacker, config);
    if critical {
        damage *= config.critical_multiplier;
    }

    let combo = combo_hits.min(config.combo_max_hits) as f64 * config.combo_bonus_per_hit;
    damage *= 1.0 + combo;

    if defender.guarding {
        damage *= 1.0 - config.defend_damage_reduction;
    }

    // 4. Round to integer; zero is a legal hit, distinct from a dodge
    let damage = damage.round().max(0.0) as u32;

    let description = if critical {
        format!(
            "{} lands a critical hit on {} for {} damage!",
            attack_label, defender.name, damage
        )
    } else {
        format!("{} hits {} for {} damage", attack_label, defender.name, damage)
    };
    CombatResult {
        damage,
        critical,
        damage_type,
        outcome: AttackOutcome::Hit,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_deterministic_physical_damage_is_exact() {
        let attacker = Combatant::new("Korra", 100, 0, 20, 0, 0, 5);
        let defender = Combatant::new("Husk", 50, 0, 5, 0, 0, 5);
        let config = BalanceConfig::deterministic();

        let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng());
        assert_eq!(result.damage, 20);
        assert!(!result.critical);
        assert_eq!(result.outcome, AttackOutcome::Hit);
    }

    #[test]
    fn test_zero_strength_hit_is_legal_and_not_a_dodge() {
        let attacker = Combatant::new("Wisp", 10, 0, 0, 0, 0, 1);
        let defender = Combatant::new("Husk", 50, 0, 5, 0, 0, 1);
        let config = BalanceConfig::deterministic();

        let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng());
        assert_eq!(result.damage, 0);
        assert_eq!(result.outcome, AttackOutcome::Hit);
    }

    #[test]
    fn test_guaranteed_dodge_yields_zero_with_dodge_outcome() {
        let attacker = Combatant::test_fighter("Korra");
        let defender = Combatant::test_fighter("Shade");
        let mut config = BalanceConfig::deterministic();
        config.base_dodge_chance = 1.0;
        config.dodge_cap = 1.0;

        let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng());
        assert_eq!(result.damage, 0);
        assert_eq!(result.outcome, AttackOutcome::Dodged);
        assert!(result.description.contains("dodged"));
    }

    #[test]
    fn test_immunity_distinct_from_dodge() {
        let attacker = Combatant::new("Lich", 80, 50, 5, 0, 30, 10);
        let defender = Combatant::new("Revenant", 80, 0, 10, 0, 0, 10)
            .with_affinity(DamageType::Death);
        let drain = Ability::new("Soul Drain", MagicSchool::Daemati, DamageType::Death, 5);
        let config = BalanceConfig::deterministic();

        let result = resolve_magic(&attacker, &defender, &drain, 0, &config, &mut rng());
        assert_eq!(result.damage, 0);
        assert_eq!(result.outcome, AttackOutcome::NoEffect);
        assert!(result.description.contains("no effect"));
    }

    #[test]
    fn test_affinity_doubles_fire_vs_ice() {
        // Base magic 30, elemental mult 1.0, Ice defender takes x2 from Fire
        let attacker = Combatant::new("Sira", 80, 50, 5, 0, 30, 5);
        let defender =
            Combatant::new("Frostling", 60, 0, 5, 0, 0, 5).with_affinity(DamageType::Ice);
        let fireball = Ability::new("Fireball", MagicSchool::Elemental, DamageType::Fire, 10);
        let config = BalanceConfig::deterministic();

        let result = resolve_magic(&attacker, &defender, &fireball, 0, &config, &mut rng());
        assert_eq!(result.damage, 60);
        assert_eq!(result.damage_type, DamageType::Fire);
    }

    #[test]
    fn test_guard_halves_incoming_damage() {
        let attacker = Combatant::new("Raider", 100, 0, 20, 0, 0, 5);
        let mut defender = Combatant::test_fighter("Korra");
        defender.guarding = true;
        let config = BalanceConfig::deterministic();

        let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng());
        assert_eq!(result.damage, 10);
    }

    #[test]
    fn test_combo_bonus_applied_and_capped() {
        let attacker = Combatant::new("Korra", 100, 0, 20, 0, 0, 5);
        let defender = Combatant::new("Husk", 50, 0, 5, 0, 0, 5);
        let mut config = BalanceConfig::deterministic();
        config.combo_bonus_per_hit = 0.10;

        let three = resolve_physical(&attacker, &defender, 3, &config, &mut rng());
        assert_eq!(three.damage, 26); // 20 * 1.3

        // Counter past the cap pays out the same as the cap
        let capped = resolve_physical(&attacker, &defender, 9, &config, &mut rng());
        let at_cap = resolve_physical(&attacker, &defender, 5, &config, &mut rng());
        assert_eq!(capped.damage, at_cap.damage);
        assert_eq!(capped.damage, 30); // 20 * 1.5
    }

    #[test]
    fn test_crit_doubles_damage() {
        let attacker = Combatant::new("Korra", 100, 0, 20, 0, 0, 5);
        let defender = Combatant::new("Husk", 50, 0, 5, 0, 0, 5);
        let mut config = BalanceConfig::deterministic();
        config.base_crit_chance = 1.0;

        let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng());
        assert!(result.critical);
        assert_eq!(result.damage, 40);
        assert!(result.description.contains("critical"));
    }

    #[test]
    fn test_crit_chance_monotonic_in_agility() {
        let config = BalanceConfig::default();
        let slow = Combatant::new("Slow", 100, 0, 10, 5, 0, 1);
        let fast = Combatant::new("Fast", 100, 0, 10, 50, 0, 1);
        assert!(crit_chance(&fast, &config) > crit_chance(&slow, &config));
    }

    #[test]
    fn test_dodge_chance_respects_cap() {
        let config = BalanceConfig::default();
        let blur = Combatant::new("Blur", 100, 0, 10, 10_000, 0, 1);
        assert_eq!(dodge_chance(&blur, &config), config.dodge_cap);
    }

    #[test]
    fn test_flee_chance_penalizes_level_gap_only_upward() {
        let config = BalanceConfig::default();
        let player = Combatant::new("Korra", 100, 0, 10, 10, 0, 5);
        let peer = Combatant::new("Peer", 100, 0, 10, 0, 0, 5);
        let elder = Combatant::new("Elder", 100, 0, 10, 0, 0, 9);
        let lesser = Combatant::new("Lesser", 100, 0, 10, 0, 0, 1);

        let against_peer = flee_chance(&player, &peer, &config);
        assert!(flee_chance(&player, &elder, &config) < against_peer);
        // No bonus for outleveling the pursuer
        assert_eq!(flee_chance(&player, &lesser, &config), against_peer);
    }

    #[test]
    fn test_forced_flee_always_succeeds() {
        let player = Combatant::test_fighter("Korra");
        let pursuer = Combatant::test_fighter("Raider");
        let mut config = BalanceConfig::deterministic();
        config.base_flee_chance = 1.0;

        let attempt = resolve_flee(&player, &pursuer, &config, &mut rng());
        assert!(attempt.success);
        assert_eq!(attempt.chance, 1.0);
    }

    #[test]
    fn test_healing_restores_from_magic_power() {
        let caster = Combatant::new("Sira", 80, 50, 5, 0, 30, 5);
        let mend = Ability::new("Mend", MagicSchool::Healing, DamageType::Light, 8);
        let mut config = BalanceConfig::deterministic();
        config.healing_school_mult = 0.8;

        let result = resolve_healing(&caster, &mend, &config, &mut rng());
        assert_eq!(result.damage, 24); // 30 * 0.8
        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert!(result.description.contains("restores"));
    }

    #[test]
    fn test_variance_band_bounds_damage() {
        let attacker = Combatant::new("Korra", 100, 0, 100, 0, 0, 5);
        let defender = Combatant::new("Husk", 50, 0, 5, 0, 0, 5);
        let mut config = BalanceConfig::deterministic();
        config.min_damage_mult = 0.85;
        config.max_damage_mult = 1.15;

        let mut rng = rng();
        for _ in 0..200 {
            let result = resolve_physical(&attacker, &defender, 0, &config, &mut rng);
            assert!(result.damage >= 85 && result.damage <= 115);
        }
    }

    #[test]
    fn test_identical_seeds_identical_results() {
        let attacker = Combatant::test_fighter("Korra");
        let defender = Combatant::test_fighter("Raider");
        let config = BalanceConfig::default();

        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let left = resolve_physical(&attacker, &defender, 0, &config, &mut a);
            let right = resolve_physical(&attacker, &defender, 0, &config, &mut b);
            assert_eq!(left.damage, right.damage);
            assert_eq!(left.critical, right.critical);
            assert_eq!(left.outcome, right.outcome);
        }
    }
}
