//! Error types for SpinWorks

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum SwError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Empty symbol set")]
    EmptySymbolSet,

    #[error("Invalid grid: {0} reels x {1} rows")]
    InvalidGrid(usize, usize),
}

/// Result type alias
pub type SwResult<T> = Result<T, SwError>;
