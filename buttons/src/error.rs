use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("button table must have exactly 8 entries, found {found}")]
pub struct TableError {
    pub found: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown button letter '{0}' (expected one of S X C T L D R U)")]
    UnknownButton(char),

    #[error("button sequence is empty")]
    EmptySequence,

    #[error("invalid 32-bit hex value '{0}'")]
    InvalidHex(String),
}
