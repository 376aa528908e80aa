//! The module contains the errors the engine can return.
//!
//! Only the group book (member registration, expense and settlement
//! admission, group lookup) can fail. The balance and simplification
//! functions are total over their inputs and never return an error.
//!
//! - [`KeyNotFound`] when a group or member id is unknown.
//! - [`ExistingKey`] when a member name is already taken in a group.
//! - [`InvalidSplit`] when an expense split does not add up.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidSplit`]: EngineError::InvalidSplit
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
}
