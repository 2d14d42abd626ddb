//! Damage type tags
//!
//! Every attack carries one tag; every combatant is aligned to one tag.
//! The pair selects the affinity table entry.

use serde::{Deserialize, Serialize};

/// Closed set of damage types. `None` is the identity element used by
/// plain physical strikes and unaligned defenders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magical,
    Fire,
    Ice,
    Darkness,
    Light,
    Nature,
    Death,
    #[default]
    None,
}

impl DamageType {
    /// The eight elements covered by the affinity table (excludes `None`).
    pub const ELEMENTS: [DamageType; 8] = [
        DamageType::Physical,
        DamageType::Magical,
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Darkness,
        DamageType::Light,
        DamageType::Nature,
        DamageType::Death,
    ];

    /// Every tag, `None` included.
    pub const ALL: [DamageType; 9] = [
        DamageType::Physical,
        DamageType::Magical,
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Darkness,
        DamageType::Light,
        DamageType::Nature,
        DamageType::Death,
        DamageType::None,
    ];

    pub fn is_elemental(self) -> bool {
        !matches!(self, DamageType::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_exclude_none() {
        assert_eq!(DamageType::ELEMENTS.len(), 8);
        assert!(!DamageType::ELEMENTS.contains(&DamageType::None));
    }

    #[test]
    fn test_none_is_default() {
        assert_eq!(DamageType::default(), DamageType::None);
        assert!(!DamageType::None.is_elemental());
        assert!(DamageType::Fire.is_elemental());
    }
}
