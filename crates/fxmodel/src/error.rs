use crate::lexer::Location;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{file}:{location}: expected {expected}, found {found}")]
    Unexpected {
        file: String,
        location: Location,
        expected: String,
        found: String,
    },
    #[error("{file}:{location}: unexpected end of file, expected {expected}")]
    EarlyEof {
        file: String,
        location: Location,
        expected: String,
    },
    #[error("{file}:{location}: invalid token `{text}`")]
    InvalidToken {
        file: String,
        location: Location,
        text: String,
    },
    #[error("{file}:{location}: invalid number `{text}`")]
    InvalidNumber {
        file: String,
        location: Location,
        text: String,
    },
    #[error("{file}:{location}: invalid {what} count {value}")]
    InvalidCount {
        file: String,
        location: Location,
        what: &'static str,
        value: i64,
    },
    #[error("failed to load particle simulation {}", path.display())]
    SimulationNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid load options")]
    Options(#[from] serde_json::Error),
}

impl Error {
    /// Source location of a syntax error, if the error has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Unexpected { location, .. }
            | Error::EarlyEof { location, .. }
            | Error::InvalidToken { location, .. }
            | Error::InvalidNumber { location, .. }
            | Error::InvalidCount { location, .. } => Some(*location),
            Error::SimulationNotFound { .. } | Error::Options(_) => None,
        }
    }
}
