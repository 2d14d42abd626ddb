//! Enemy AI policies
//!
//! Each policy maps a behavior tag to one or more actions for the enemy's
//! slot in the phase. Every attack goes through the same resolver as the
//! player's; there is no enemy-only damage path.

use rand::Rng;

use crate::combat::combatant::{Ability, BehaviorKind, Combatant, MagicSchool};
use crate::combat::config::BalanceConfig;
use crate::combat::resolver::{self, CombatResult};

/// What an enemy chose to do with its slot in the enemy phase.
#[derive(Debug, Clone)]
pub enum EnemyAction {
    Attack(CombatResult),
    /// Logged stance with no mechanical effect
    Defend { description: String },
}

/// Run one enemy's turn against the player. Returns the action list in
/// order; Berserker frenzy is the only policy that yields more than one.
///
/// Mutates the enemy only to deduct mana for casts. Damage application is
/// the encounter's job, driven by the returned results.
pub fn take_turn(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Vec<EnemyAction> {
    match enemy.behavior {
        // Balanced is an alias, kept as a distinct tag for authoring
        BehaviorKind::Aggressive | BehaviorKind::Balanced => {
            aggressive_turn(enemy, player, config, rng)
        }
        BehaviorKind::Defensive => defensive_turn(enemy, player, config, rng),
        BehaviorKind::Tactical => tactical_turn(enemy, player, config, rng),
        BehaviorKind::Berserker => berserker_turn(enemy, player, config, rng),
    }
}

/// 50% chance to throw a random castable ability, otherwise swing.
fn aggressive_turn(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Vec<EnemyAction> {
    if rng.gen_bool(0.5) {
        if let Some(result) = cast_random_ability(enemy, player, config, rng) {
            return vec![EnemyAction::Attack(result)];
        }
    }
    vec![physical(enemy, player, config, rng)]
}

/// Hunkers down when badly hurt; otherwise coin-flips between swinging
/// and holding. The defend here is stance flavor only, unlike the
/// player's guarded phase.
fn defensive_turn(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Vec<EnemyAction> {
    if enemy.health_fraction() < 0.3 || !rng.gen_bool(0.5) {
        return vec![EnemyAction::Defend {
            description: format!("{} takes a defensive stance", enemy.name),
        }];
    }
    vec![physical(enemy, player, config, rng)]
}

/// Leads with magic whenever it has the power and mana for it.
fn tactical_turn(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Vec<EnemyAction> {
    if enemy.magic_power > 0 {
        if let Some(result) = cast_random_ability(enemy, player, config, rng) {
            return vec![EnemyAction::Attack(result)];
        }
    }
    vec![physical(enemy, player, config, rng)]
}

/// Always swings; below half health it swings twice.
fn berserker_turn(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Vec<EnemyAction> {
    let mut actions = vec![physical(enemy, player, config, rng)];
    if enemy.health_fraction() < 0.5 {
        actions.push(physical(enemy, player, config, rng));
    }
    actions
}

fn physical(
    enemy: &Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> EnemyAction {
    // Enemies never build combo; the counter is a player mechanic
    EnemyAction::Attack(resolver::resolve_physical(enemy, player, 0, config, rng))
}

/// Pick a random offensive ability the enemy can afford, spend the mana,
/// and resolve it. `None` when nothing is castable.
fn cast_random_ability(
    enemy: &mut Combatant,
    player: &Combatant,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Option<CombatResult> {
    let castable: Vec<usize> = enemy
        .abilities
        .iter()
        .enumerate()
        .filter(|(_, a)| a.school != MagicSchool::Healing && enemy.mana >= a.mana_cost)
        .map(|(i, _)| i)
        .collect();
    if castable.is_empty() {
        return None;
    }
    let ability: Ability = enemy.abilities[castable[rng.gen_range(0..castable.len())]].clone();
    enemy.spend_mana(ability.mana_cost);
    Some(resolver::resolve_magic(
        enemy, player, &ability, 0, config, rng,
    ))
}
