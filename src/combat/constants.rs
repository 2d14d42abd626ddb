//! Combat balance constants - all default tunable values in one place
//!
//! `BalanceConfig::default()` reads these; a caller can override any of them
//! per difficulty preset.

// Critical hits
pub const BASE_CRIT_CHANCE: f64 = 0.05;
pub const AGILITY_CRIT_SCALE: f64 = 0.002;
pub const CRITICAL_MULTIPLIER: f64 = 2.0;

// Dodging
pub const BASE_DODGE_CHANCE: f64 = 0.03;
pub const AGILITY_DODGE_SCALE: f64 = 0.003;
pub const DODGE_CAP: f64 = 0.35;

// Fleeing
pub const BASE_FLEE_CHANCE: f64 = 0.40;
pub const AGILITY_FLEE_SCALE: f64 = 0.01;
pub const LEVEL_FLEE_PENALTY: f64 = 0.05;

// Damage variance band (uniform multiplier per hit)
pub const MIN_DAMAGE_MULT: f64 = 0.85;
pub const MAX_DAMAGE_MULT: f64 = 1.15;

// Base damage scaling
pub const STRENGTH_DAMAGE_SCALE: f64 = 1.0;

// Magic school multipliers
pub const ELEMENTAL_SCHOOL_MULT: f64 = 1.0;
pub const DAEMATI_SCHOOL_MULT: f64 = 1.25;
pub const HEALING_SCHOOL_MULT: f64 = 0.8;

// Defending - fraction shaved off every hit in the next enemy phase
pub const DEFEND_DAMAGE_REDUCTION: f64 = 0.5;

// Combo - consecutive-hit bonus, tracked per encounter
pub const COMBO_BONUS_PER_HIT: f64 = 0.10;
pub const COMBO_MAX_HITS: u32 = 5;
pub const COMBO_DODGE_TOLERANCE: u32 = 1;
