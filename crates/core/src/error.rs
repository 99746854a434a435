//! Error types for the StackSim domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Container failures and input failures each get their own enum; both fold
//! into the top-level [`Error`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The top-level error type for all StackSim operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Container errors ---
    #[error("Stack error: {0}")]
    Stack(#[from] StackError),

    // --- Input errors ---
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// The four user-visible error kinds.
///
/// Several concrete errors share a kind: popping and peeking an empty stack
/// are both underflows even though their messages differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCapacity,
    Overflow,
    Underflow,
    InvalidInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidCapacity => "invalid_capacity",
            Self::Overflow => "overflow",
            Self::Underflow => "underflow",
            Self::InvalidInput => "invalid_input",
        };
        f.write_str(name)
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("Capacity must be positive (got {0})")]
    InvalidCapacity(i64),

    #[error("Stack Overflow")]
    Overflow { capacity: usize },

    #[error("Stack Underflow")]
    Underflow,

    #[error("Stack is empty")]
    Empty,
}

impl StackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCapacity(_) => ErrorKind::InvalidCapacity,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::Underflow | Self::Empty => ErrorKind::Underflow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Input field is empty. Please enter a numeric value.")]
    Empty,

    #[error("Please enter a valid numeric value.")]
    NotNumeric(String),
}

impl InputError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Stack(e) => e.kind(),
            Self::Input(e) => e.kind(),
        }
    }
}
