//! Error taxonomy for emulator access and turn execution

use std::time::Duration;

use kanto_battle::{ListPosition, TurnSnapshot};
use thiserror::Error;

/// Failure talking to the emulator
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {body:?}")]
    InvalidResponse { endpoint: String, body: String },

    #[error("short read at {address:#010x}: wanted {expected} bytes, got {actual}")]
    ShortRead {
        address: u32,
        expected: usize,
        actual: usize,
    },

    #[error("emulator disconnected")]
    Disconnected,
}

/// Broad category of a [`TurnError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Validation,
    Precondition,
    ResolutionTimeout,
    IdentityMismatch,
    Navigation,
    Unsupported,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Validation => "validation",
            ErrorKind::Precondition => "precondition",
            ErrorKind::ResolutionTimeout => "timeout",
            ErrorKind::IdentityMismatch => "identity_mismatch",
            ErrorKind::Navigation => "navigation",
            ErrorKind::Unsupported => "unsupported",
        }
    }
}

/// Why a turn could not be carried out
#[derive(Error, Debug)]
pub enum TurnError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid {what} {value} (must be {min}-{max})")]
    Validation {
        what: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("not currently in a battle")]
    NotInBattle,

    #[error("no creature in slot {0}")]
    EmptySlot(u8),

    #[error("creature in slot {0} has fainted")]
    Fainted(u8),

    #[error("creature in slot {0} is already active in battle")]
    AlreadyActive(u8),

    #[error("turn did not complete within {0:?}")]
    ResolutionTimeout(Duration),

    #[error("{species_name} (slot {slot}) not found in the party menu")]
    IdentityMismatch { slot: u8, species_name: String },

    #[error("party cursor at {observed} instead of {target} after {attempts} attempts")]
    CursorDesync {
        target: ListPosition,
        observed: ListPosition,
        attempts: u32,
    },

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl TurnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TurnError::Transport(_) => ErrorKind::Transport,
            TurnError::Validation { .. } => ErrorKind::Validation,
            TurnError::NotInBattle
            | TurnError::EmptySlot(_)
            | TurnError::Fainted(_)
            | TurnError::AlreadyActive(_) => ErrorKind::Precondition,
            TurnError::ResolutionTimeout(_) => ErrorKind::ResolutionTimeout,
            TurnError::IdentityMismatch { .. } => ErrorKind::IdentityMismatch,
            TurnError::CursorDesync { .. } => ErrorKind::Navigation,
            TurnError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}

/// Reject `value` unless it lies in `min..=max`
pub(crate) fn validate_range(what: &'static str, value: u8, min: u8, max: u8) -> Result<u8, TurnError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(TurnError::Validation {
            what,
            value,
            min,
            max,
        })
    }
}

/// A failed turn, with the state captured before any input when available
#[derive(Error, Debug)]
#[error("{error}")]
pub struct TurnFailure {
    pub error: TurnError,
    pub pre_state: Option<TurnSnapshot>,
}

impl TurnFailure {
    pub fn new(error: TurnError, pre_state: Option<TurnSnapshot>) -> Self {
        Self { error, pre_state }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Failure of a read-only query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("not currently in a battle")]
    NotInBattle,

    #[error("no active creature found in slot {0}")]
    NoActiveCreature(u8),

    #[error("no opponent found")]
    NoOpponent,

    #[error(transparent)]
    Transport(#[from] TransportError),
}
