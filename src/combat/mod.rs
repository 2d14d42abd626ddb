//! Turn-based combat: encounters, damage resolution, affinities, enemy AI

pub mod affinity;
pub mod behavior;
pub mod combatant;
pub mod config;
pub mod constants;
pub mod damage_type;
pub mod encounter;
pub mod resolver;

pub use affinity::{affinity_between, affinity_multiplier, Affinity};
pub use behavior::EnemyAction;
pub use combatant::{Ability, BehaviorKind, Combatant, MagicSchool};
pub use config::BalanceConfig;
pub use damage_type::DamageType;
pub use encounter::{Encounter, EncounterEvent, EncounterRewards, EncounterState, EventKind};
pub use resolver::{AttackOutcome, CombatResult, FleeAttempt};
