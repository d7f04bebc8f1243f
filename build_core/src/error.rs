//! Errors raised by the character build

use thiserror::Error;

/// Character build error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unknown stat field: {0}")]
    UnknownStat(String),
}
