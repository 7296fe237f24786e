use buttons::TableError;
use ir::EnvError;
use thiserror::Error;

pub type SolveResult<T> = Result<T, SolveError>;

/// Rejected before any constraint is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sequence length must be positive")]
    ZeroLength,

    #[error("repetition count must be positive")]
    ZeroRepetitions,

    #[error("repetition count {repetitions} does not divide sequence length {length}")]
    UnevenRepetition { length: usize, repetitions: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Z3 gave up (timeout, resource limit, cancellation). Not a proof of unsat.
    #[error("solver aborted: {0}")]
    Aborted(String),

    #[error("failed to encode the hash: {0}")]
    Encoding(#[from] EnvError),

    #[error("bad model: {0}")]
    Model(String),
}

impl SolveError {
    pub fn model(message: impl Into<String>) -> Self {
        SolveError::Model(message.into())
    }
}
