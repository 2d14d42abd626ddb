//! Elemental affinity resolution: attack element vs defender element
//!
//! Hand-authored 8x8 lore table with five discrete levels. The lookup is a
//! total match, so a missing entry cannot exist at runtime.

use serde::{Deserialize, Serialize};

use crate::combat::damage_type::DamageType;

/// How strongly an attack element lands against a defender element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    /// Defender is very weak to the attack
    VeryWeak,
    /// Defender is weak to the attack
    Weak,
    Neutral,
    /// Defender shrugs off most of the attack
    Resistant,
    /// Attack has no effect at all
    Immune,
}

impl Affinity {
    pub fn multiplier(self) -> f64 {
        match self {
            Affinity::VeryWeak => 2.0,
            Affinity::Weak => 1.5,
            Affinity::Neutral => 1.0,
            Affinity::Resistant => 0.5,
            Affinity::Immune => 0.0,
        }
    }
}

/// Look up the affinity of an attack element against a defender element.
///
/// Lookup direction matters: `(Fire, Ice)` asks how hard a fire attack hits
/// an ice-aligned defender.
pub fn affinity_between(attack: DamageType, defender: DamageType) -> Affinity {
    use Affinity::*;
    use DamageType::*;

    match (attack, defender) {
        // None is the identity element on either side
        (None, _) | (_, None) => Neutral,

        // Physical: armor drills against armor, ice shatters, the dead feel little
        (Physical, Physical) => Resistant,
        (Physical, Ice) => Weak,
        (Physical, Death) => Resistant,
        (Physical, _) => Neutral,

        // Raw magic: disrupted by its own kind, tears through living growth
        (Magical, Magical) => Resistant,
        (Magical, Nature) => Weak,
        (Magical, _) => Neutral,

        // Fire: melts ice outright and burns growth
        (Fire, Fire) => Resistant,
        (Fire, Ice) => VeryWeak,
        (Fire, Nature) => Weak,
        (Fire, _) => Neutral,

        // Ice: smothered by flame, frost still kills growth
        (Ice, Fire) => Resistant,
        (Ice, Ice) => Resistant,
        (Ice, Nature) => Weak,
        (Ice, _) => Neutral,

        // Darkness: anathema to light, but death already belongs to the dark
        (Darkness, Darkness) => Resistant,
        (Darkness, Light) => VeryWeak,
        (Darkness, Nature) => Weak,
        (Darkness, Death) => Resistant,
        (Darkness, _) => Neutral,

        // Light: anathema to darkness, sears the dead
        (Light, Darkness) => VeryWeak,
        (Light, Light) => Resistant,
        (Light, Death) => Weak,
        (Light, _) => Neutral,

        // Nature: flame consumes it before it lands, cannot choke the dead
        (Nature, Fire) => Resistant,
        (Nature, Nature) => Resistant,
        (Nature, Death) => Resistant,
        (Nature, _) => Neutral,

        // Death: wards off light, withers growth, cannot claim the already-dead
        (Death, Light) => Resistant,
        (Death, Nature) => Weak,
        (Death, Death) => Immune,
        (Death, _) => Neutral,
    }
}

/// Convenience wrapper returning the numeric multiplier directly.
pub fn affinity_multiplier(attack: DamageType, defender: DamageType) -> f64 {
    affinity_between(attack, defender).multiplier()
}
