//! Balance configuration bundle
//!
//! An immutable value constructed once per encounter and passed by reference.
//! There is no global or singleton balance state; difficulty presets are just
//! different `BalanceConfig` values (optionally parsed from JSON).

use serde::{Deserialize, Serialize};

use crate::combat::combatant::MagicSchool;
use crate::combat::constants::*;
use crate::core::error::{CombatError, Result};

/// Tunable constants for the probability and damage resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub base_crit_chance: f64,
    pub agility_crit_scale: f64,
    pub critical_multiplier: f64,

    pub base_dodge_chance: f64,
    pub agility_dodge_scale: f64,
    pub dodge_cap: f64,

    pub base_flee_chance: f64,
    pub agility_flee_scale: f64,
    pub level_flee_penalty: f64,

    pub min_damage_mult: f64,
    pub max_damage_mult: f64,
    pub strength_damage_scale: f64,

    pub elemental_school_mult: f64,
    pub daemati_school_mult: f64,
    pub healing_school_mult: f64,

    pub defend_damage_reduction: f64,

    pub combo_bonus_per_hit: f64,
    pub combo_max_hits: u32,
    pub combo_dodge_tolerance: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            base_crit_chance: BASE_CRIT_CHANCE,
            agility_crit_scale: AGILITY_CRIT_SCALE,
            critical_multiplier: CRITICAL_MULTIPLIER,
            base_dodge_chance: BASE_DODGE_CHANCE,
            agility_dodge_scale: AGILITY_DODGE_SCALE,
            dodge_cap: DODGE_CAP,
            base_flee_chance: BASE_FLEE_CHANCE,
            agility_flee_scale: AGILITY_FLEE_SCALE,
            level_flee_penalty: LEVEL_FLEE_PENALTY,
            min_damage_mult: MIN_DAMAGE_MULT,
            max_damage_mult: MAX_DAMAGE_MULT,
            strength_damage_scale: STRENGTH_DAMAGE_SCALE,
            elemental_school_mult: ELEMENTAL_SCHOOL_MULT,
            daemati_school_mult: DAEMATI_SCHOOL_MULT,
            healing_school_mult: HEALING_SCHOOL_MULT,
            defend_damage_reduction: DEFEND_DAMAGE_REDUCTION,
            combo_bonus_per_hit: COMBO_BONUS_PER_HIT,
            combo_max_hits: COMBO_MAX_HITS,
            combo_dodge_tolerance: COMBO_DODGE_TOLERANCE,
        }
    }
}

impl BalanceConfig {
    /// Config with every random element neutralized: no crits, no dodges,
    /// fixed variance, no combo. Scripted encounters and tests use this to
    /// assert exact damage numbers.
    pub fn deterministic() -> Self {
        Self {
            base_crit_chance: 0.0,
            agility_crit_scale: 0.0,
            base_dodge_chance: 0.0,
            agility_dodge_scale: 0.0,
            min_damage_mult: 1.0,
            max_damage_mult: 1.0,
            combo_bonus_per_hit: 0.0,
            ..Self::default()
        }
    }

    pub fn school_multiplier(&self, school: MagicSchool) -> f64 {
        match school {
            MagicSchool::Elemental => self.elemental_school_mult,
            MagicSchool::Daemati => self.daemati_school_mult,
            MagicSchool::Healing => self.healing_school_mult,
        }
    }

    /// Parse and validate a config from JSON. No file I/O here; the caller
    /// decides where preset data lives.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject bundles the resolver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.dodge_cap) {
            return Err(CombatError::InvalidConfig(format!(
                "dodge_cap must be within [0, 1], got {}",
                self.dodge_cap
            )));
        }
        if self.min_damage_mult <= 0.0 || self.min_damage_mult > self.max_damage_mult {
            return Err(CombatError::InvalidConfig(format!(
                "damage variance band [{}, {}] is invalid",
                self.min_damage_mult, self.max_damage_mult
            )));
        }
        if self.critical_multiplier < 1.0 {
            return Err(CombatError::InvalidConfig(format!(
                "critical_multiplier must be at least 1.0, got {}",
                self.critical_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.defend_damage_reduction) {
            return Err(CombatError::InvalidConfig(format!(
                "defend_damage_reduction must be within [0, 1], got {}",
                self.defend_damage_reduction
            )));
        }
        if self.combo_bonus_per_hit < 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "combo_bonus_per_hit must not be negative, got {}",
                self.combo_bonus_per_hit
            )));
        }
        for (name, mult) in [
            ("elemental_school_mult", self.elemental_school_mult),
            ("daemati_school_mult", self.daemati_school_mult),
            ("healing_school_mult", self.healing_school_mult),
            ("strength_damage_scale", self.strength_damage_scale),
        ] {
            if mult < 0.0 {
                return Err(CombatError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, mult
                )));
            }
        }
        Ok(())
    }
}
