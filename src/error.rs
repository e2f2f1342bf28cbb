use std::fmt;

/// Errors returned by the APMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The reserved key (`0`) was passed to `insert` or `delete`.
    InvalidKey,

    /// The configuration breaks one of its constraints; the message names it.
    InvalidConfig(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "the reserved key cannot be stored"),

            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
