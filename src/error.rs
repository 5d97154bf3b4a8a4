use thiserror::Error;

use crate::Phase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("failed to allocate {count} {what}")]
    AllocationFailure { what: &'static str, count: usize },

    #[error("{territory} has {troops} troop(s); at least 2 are needed to attack")]
    InsufficientTroops { territory: String, troops: u32 },

    #[error("{attacker} cannot attack {defender}: both belong to {color}")]
    FriendlyFireRejected {
        attacker: String,
        defender: String,
        color: String,
    },

    #[error("territory {index} cannot attack itself")]
    SelfAttack { index: usize },

    #[error("no territory at index {index} (registry holds {len})")]
    UnknownTerritory { index: usize, len: usize },

    #[error("no player at index {index} (registry holds {len})")]
    UnknownPlayer { index: usize, len: usize },

    #[error("expected the {expected:?} phase, game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("the {what} registry is full ({capacity} entries)")]
    RegistryFull { what: &'static str, capacity: usize },
}

pub type GameResult<T> = Result<T, GameError>;
