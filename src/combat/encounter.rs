//! Encounter state machine
//!
//! The aggregate root of a fight: owns the player and the enemy roster for
//! the duration, sequences player and enemy phases, applies resolver output,
//! and appends every visible outcome to an ordered event log. Callers drive
//! it one action at a time; there is no internal concurrency.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::combat::behavior::{self, EnemyAction};
use crate::combat::combatant::{Ability, Combatant, MagicSchool};
use crate::combat::config::BalanceConfig;
use crate::combat::resolver::{self, AttackOutcome, CombatResult};
use crate::core::error::{CombatError, Result};

/// Phase of an encounter. Victory, Defeat, and Fled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Fled,
}

impl EncounterState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EncounterState::Victory | EncounterState::Defeat | EncounterState::Fled
        )
    }
}

/// What produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    EncounterStart,
    PlayerAction,
    EnemyAction,
    PhaseChange,
    Outcome,
}

/// One entry in the append-only encounter log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub turn: u32,
    pub kind: EventKind,
    pub description: String,
}

/// Totals granted when the last enemy falls. Loot identifiers are opaque;
/// rolling the actual items happens outside the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterRewards {
    pub experience: u64,
    pub gold: u64,
    pub loot: Vec<String>,
}

/// One complete fight from `start()` to a terminal state.
///
/// Enemy roster order is initiative order and never changes; defeated
/// enemies stay in place at zero health and are skipped, not removed.
/// Holds its own seeded RNG stream, so two encounters built with the same
/// seed and driven identically produce identical logs.
#[derive(Debug)]
pub struct Encounter {
    player: Combatant,
    enemies: Vec<Combatant>,
    state: EncounterState,
    turn: u32,
    events: Vec<EncounterEvent>,
    config: BalanceConfig,
    rng: ChaCha8Rng,
    // Player-only combo tracking, lives on the fight rather than the combatant
    combo_hits: u32,
    combo_dodges: u32,
    rewards: Option<EncounterRewards>,
}

impl Encounter {
    /// Build a fight. Fails on an empty roster or an invalid config; the
    /// roster is fixed from here on.
    pub fn new(
        player: Combatant,
        enemies: Vec<Combatant>,
        config: BalanceConfig,
        seed: u64,
    ) -> Result<Self> {
        if enemies.is_empty() {
            return Err(CombatError::NoEnemies);
        }
        config.validate()?;
        Ok(Self {
            player,
            enemies,
            state: EncounterState::NotStarted,
            turn: 0,
            events: Vec::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            combo_hits: 0,
            combo_dodges: 0,
            rewards: None,
        })
    }

    /// Open the fight: turn 1, player acts first.
    pub fn start(&mut self) -> Result<()> {
        if self.state != EncounterState::NotStarted {
            warn!(state = ?self.state, "start called on a running encounter");
            return Err(CombatError::WrongState(self.state));
        }
        self.turn = 1;
        self.state = EncounterState::PlayerTurn;
        let roster = self
            .enemies
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.push_event(
            EventKind::EncounterStart,
            format!("{} is ambushed by {}", self.player.name, roster),
        );
        Ok(())
    }

    /// Plain physical attack against the enemy at `target`.
    pub fn attack_physical(&mut self, target: usize) -> Result<CombatResult> {
        self.require_player_turn()?;
        self.require_living_target(target)?;

        let result = resolver::resolve_physical(
            &self.player,
            &self.enemies[target],
            self.combo_hits,
            &self.config,
            &mut self.rng,
        );
        self.apply_player_attack(target, &result);
        Ok(result)
    }

    /// Cast a known ability. Offensive schools target the enemy at `target`;
    /// the Healing school restores the caster and ignores the target slot.
    pub fn attack_magic(&mut self, target: usize, ability_name: &str) -> Result<CombatResult> {
        self.require_player_turn()?;

        let ability = self.find_ability(ability_name)?;
        if self.player.mana < ability.mana_cost {
            warn!(
                ability = %ability.name,
                needed = ability.mana_cost,
                available = self.player.mana,
                "cast without the mana to pay for it"
            );
            return Err(CombatError::InsufficientMagic {
                needed: ability.mana_cost,
                available: self.player.mana,
            });
        }

        if ability.school == MagicSchool::Healing {
            self.player.spend_mana(ability.mana_cost);
            let result = resolver::resolve_healing(&self.player, &ability, &self.config, &mut self.rng);
            self.player.heal(result.damage);
            self.push_event(EventKind::PlayerAction, result.description.clone());
            self.run_enemy_phase();
            return Ok(result);
        }

        self.require_living_target(target)?;
        self.player.spend_mana(ability.mana_cost);
        let result = resolver::resolve_magic(
            &self.player,
            &self.enemies[target],
            &ability,
            self.combo_hits,
            &self.config,
            &mut self.rng,
        );
        self.apply_player_attack(target, &result);
        Ok(result)
    }

    /// Take a guarded stance: every hit in the coming enemy phase is
    /// reduced, then the stance drops.
    pub fn defend(&mut self) -> Result<()> {
        self.require_player_turn()?;
        self.player.guarding = true;
        self.push_event(
            EventKind::PlayerAction,
            format!("{} braces behind their guard", self.player.name),
        );
        self.run_enemy_phase();
        Ok(())
    }

    /// Attempt to escape past the strongest living enemy. Success ends the
    /// fight with no rewards and no enemy phase; failure hands the turn over.
    pub fn flee(&mut self) -> Result<bool> {
        self.require_player_turn()?;

        // Roster order breaks strength ties, so the first strongest pursues
        let pursuer = self
            .strongest_living_enemy()
            .ok_or(CombatError::NoEnemies)?;
        let attempt =
            resolver::resolve_flee(&self.player, &self.enemies[pursuer], &self.config, &mut self.rng);
        self.push_event(EventKind::PlayerAction, attempt.description.clone());

        if attempt.success {
            self.state = EncounterState::Fled;
            debug!(turn = self.turn, "encounter ended in flight");
            self.push_event(
                EventKind::Outcome,
                format!("{} fled the encounter", self.player.name),
            );
        } else {
            self.run_enemy_phase();
        }
        Ok(attempt.success)
    }

    /// Log an item use and hand the turn over. The item's effect was already
    /// applied by the inventory collaborator that owns it.
    pub fn use_item(&mut self, item_id: &str) -> Result<()> {
        self.require_player_turn()?;
        self.push_event(
            EventKind::PlayerAction,
            format!("{} uses {}", self.player.name, item_id),
        );
        self.run_enemy_phase();
        Ok(())
    }

    // --- read accessors ---

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn events(&self) -> &[EncounterEvent] {
        &self.events
    }

    /// Ordered description strings, the presentation-facing view of `events`.
    pub fn log(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.description.as_str()).collect()
    }

    pub fn is_victory(&self) -> bool {
        self.state == EncounterState::Victory
    }

    pub fn is_defeat(&self) -> bool {
        self.state == EncounterState::Defeat
    }

    pub fn is_fled(&self) -> bool {
        self.state == EncounterState::Fled
    }

    /// Aggregated rewards, present once the state is Victory.
    pub fn rewards(&self) -> Option<&EncounterRewards> {
        self.rewards.as_ref()
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn combo_hits(&self) -> u32 {
        self.combo_hits
    }

    // --- internals ---

    fn require_player_turn(&self) -> Result<()> {
        if self.state != EncounterState::PlayerTurn {
            warn!(state = ?self.state, "player action outside the player turn");
            return Err(CombatError::WrongState(self.state));
        }
        Ok(())
    }

    fn require_living_target(&self, target: usize) -> Result<()> {
        match self.enemies.get(target) {
            Some(enemy) if enemy.is_alive() => Ok(()),
            Some(enemy) => {
                warn!(target, enemy = %enemy.name, "attack aimed at a downed enemy");
                Err(CombatError::InvalidTarget(format!(
                    "{} is already down",
                    enemy.name
                )))
            }
            None => {
                warn!(target, "attack aimed at an empty roster slot");
                Err(CombatError::InvalidTarget(format!(
                    "no enemy in slot {}",
                    target
                )))
            }
        }
    }

    fn find_ability(&self, name: &str) -> Result<Ability> {
        self.player
            .abilities
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| {
                warn!(ability = name, "cast of an unknown ability");
                CombatError::UnknownAbility(name.to_string())
            })
    }

    /// Apply an offensive result, update the combo counter, then either end
    /// the fight in victory or run the enemy phase.
    fn apply_player_attack(&mut self, target: usize, result: &CombatResult) {
        self.enemies[target].take_damage(result.damage);
        self.push_event(EventKind::PlayerAction, result.description.clone());
        debug!(
            target = %self.enemies[target].name,
            damage = result.damage,
            outcome = ?result.outcome,
            "player attack resolved"
        );
        self.update_combo(result.outcome);

        if !self.enemies[target].is_alive() {
            self.push_event(
                EventKind::Outcome,
                format!("{} falls", self.enemies[target].name),
            );
        }

        // A kill that empties the roster ends the fight before enemies act
        if self.enemies.iter().all(|e| !e.is_alive()) {
            self.finish_victory();
        } else {
            self.run_enemy_phase();
        }
    }

    fn update_combo(&mut self, outcome: AttackOutcome) {
        match outcome {
            AttackOutcome::Hit => {
                self.combo_hits = (self.combo_hits + 1).min(self.config.combo_max_hits);
                self.combo_dodges = 0;
            }
            AttackOutcome::Dodged => {
                self.combo_dodges += 1;
                if self.combo_dodges > self.config.combo_dodge_tolerance {
                    self.combo_hits = 0;
                    self.combo_dodges = 0;
                }
            }
            // Immunity neither extends nor breaks a rhythm
            AttackOutcome::NoEffect => {}
        }
    }

    /// First living enemy with strictly the highest strength.
    fn strongest_living_enemy(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            match best {
                Some(b) if self.enemies[b].strength >= enemy.strength => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Every living enemy acts once, in roster order. Defeat is only
    /// checked after the full phase; a downed player still absorbs the
    /// remaining enemies' actions this phase.
    fn run_enemy_phase(&mut self) {
        self.state = EncounterState::EnemyTurn;

        for i in 0..self.enemies.len() {
            if !self.enemies[i].is_alive() {
                continue;
            }
            let actions =
                behavior::take_turn(&mut self.enemies[i], &self.player, &self.config, &mut self.rng);
            for action in actions {
                match action {
                    EnemyAction::Attack(result) => {
                        self.player.take_damage(result.damage);
                        self.push_event(EventKind::EnemyAction, result.description);
                    }
                    EnemyAction::Defend { description } => {
                        self.push_event(EventKind::EnemyAction, description);
                    }
                }
            }
        }

        // Guard covers exactly one enemy phase
        self.player.guarding = false;

        if !self.player.is_alive() {
            self.state = EncounterState::Defeat;
            debug!(turn = self.turn, "player has fallen, encounter lost");
            self.push_event(
                EventKind::Outcome,
                format!("{} has been defeated", self.player.name),
            );
        } else {
            self.turn += 1;
            self.state = EncounterState::PlayerTurn;
            self.push_event(EventKind::PhaseChange, format!("Turn {}", self.turn));
        }
    }

    fn finish_victory(&mut self) {
        let mut rewards = EncounterRewards::default();
        for enemy in &self.enemies {
            rewards.experience += enemy.xp_reward;
            rewards.gold += enemy.gold_reward;
            rewards.loot.extend(enemy.loot.iter().cloned());
        }
        self.player.experience += rewards.experience;
        self.state = EncounterState::Victory;
        debug!(
            turn = self.turn,
            experience = rewards.experience,
            gold = rewards.gold,
            "encounter won"
        );
        self.push_event(
            EventKind::Outcome,
            format!(
                "{} is victorious: {} experience, {} gold",
                self.player.name, rewards.experience, rewards.gold
            ),
        );
        self.rewards = Some(rewards);
    }

    fn push_event(&mut self, kind: EventKind, description: String) {
        self.events.push(EncounterEvent {
            turn: self.turn,
            kind,
            description,
        });
    }
}
