//! Combatants, abilities, and behavior tags
//!
//! One role-agnostic view shared by the player and enemies. The encounter
//! owns these for the duration of a fight; the persistent character record
//! stays with the caller.

use serde::{Deserialize, Serialize};

use crate::combat::damage_type::DamageType;

/// Magic school - selects the power multiplier for an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicSchool {
    Elemental,
    /// Mind magic
    Daemati,
    Healing,
}

/// A known magic ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub school: MagicSchool,
    pub damage_type: DamageType,
    pub mana_cost: u32,
}

impl Ability {
    pub fn new(
        name: impl Into<String>,
        school: MagicSchool,
        damage_type: DamageType,
        mana_cost: u32,
    ) -> Self {
        Self {
            name: name.into(),
            school,
            damage_type,
            mana_cost,
        }
    }
}

/// Closed set of enemy AI policies. `Balanced` falls through to `Aggressive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviorKind {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
    Tactical,
    Berserker,
}

/// A participant in an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    /// Secondary resource spent on abilities
    pub mana: u32,
    pub max_mana: u32,

    // Attributes feeding the damage formulas
    pub strength: u32,
    pub agility: u32,
    pub magic_power: u32,
    pub level: u32,

    /// Elemental alignment used as the defender side of affinity lookups
    pub affinity: DamageType,
    pub abilities: Vec<Ability>,
    /// AI policy; ignored for the player
    pub behavior: BehaviorKind,

    // Rewards granted on defeat (enemy side)
    pub xp_reward: u64,
    pub gold_reward: u64,
    /// Opaque loot identifiers; generation happens outside the engine
    pub loot: Vec<String>,

    /// Experience accumulated across encounters (player side)
    pub experience: u64,
    /// One-phase defend flag, consumed by the resolver
    pub guarding: bool,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        max_mana: u32,
        strength: u32,
        agility: u32,
        magic_power: u32,
        level: u32,
    ) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            strength,
            agility,
            magic_power,
            level,
            affinity: DamageType::None,
            abilities: Vec::new(),
            behavior: BehaviorKind::default(),
            xp_reward: 0,
            gold_reward: 0,
            loot: Vec::new(),
            experience: 0,
            guarding: false,
        }
    }

    pub fn with_affinity(mut self, affinity: DamageType) -> Self {
        self.affinity = affinity;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorKind) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_rewards(mut self, xp: u64, gold: u64) -> Self {
        self.xp_reward = xp;
        self.gold_reward = gold;
        self
    }

    pub fn with_loot(mut self, loot: Vec<String>) -> Self {
        self.loot = loot;
        self
    }

    /// Start the fight below full health (wounded enemies, scripted fights).
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health is clamped at zero; it never goes negative.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn spend_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f64 / self.max_health as f64
        }
    }

    pub fn can_cast(&self, ability: &Ability) -> bool {
        self.mana >= ability.mana_cost
    }

    pub fn knows(&self, ability: &Ability) -> bool {
        self.abilities.iter().any(|a| a.name == ability.name)
    }

    /// Test combatant: plain fighter with no magic
    pub fn test_fighter(name: &str) -> Self {
        Self::new(name, 100, 0, 20, 10, 0, 5)
    }

    /// Test combatant: caster with a fire ability
    pub fn test_caster(name: &str) -> Self {
        Self::new(name, 80, 50, 8, 12, 30, 5).with_abilities(vec![Ability::new(
            "Fireball",
            MagicSchool::Elemental,
            DamageType::Fire,
            10,
        )])
    }
}
