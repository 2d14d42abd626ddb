use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Action not allowed in state {0:?}")]
    WrongState(crate::combat::encounter::EncounterState),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Encounter requires at least one enemy")]
    NoEnemies,

    #[error("Not enough magic: need {needed}, have {available}")]
    InsufficientMagic { needed: u32, available: u32 },

    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Invalid balance configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
