//! # Error Types
//!
//! Mirrors the teacher's single `thiserror` enum with `#[from]` for the one
//! external error source, but layers the severity/id model of the encoding
//! pipeline on top: every variant carries the numeric id that deep helpers
//! embed in `errtxt` (e.g. `"340: Input too long..."`), so callers can match
//! on `id()` without parsing text.

use thiserror::Error;

/// A non-fatal problem: the symbol was still produced but violates a standard,
/// or a caller-supplied option was silently normalized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("invalid option, using default")]
    InvalidOption { id: u16 },
    #[error("{message}")]
    Noncompliant { id: u16, message: String },
    #[error("using ECI {eci}")]
    UsesEci { id: u16, eci: u32 },
    #[error("Human Readable Text truncated")]
    HrtTruncated { id: u16 },
}

impl Warning {
    pub fn id(&self) -> u16 {
        match self {
            Warning::InvalidOption { id }
            | Warning::Noncompliant { id, .. }
            | Warning::UsesEci { id, .. }
            | Warning::HrtTruncated { id } => *id,
        }
    }
}

/// A fatal problem: encoding did not complete and output fields are undefined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZintError {
    #[error("input too long ({max} character maximum)")]
    TooLong { id: u16, max: usize },

    #[error("{message}")]
    InvalidData { id: u16, message: String },

    #[error("invalid check digit '{found}', expecting '{expected}'")]
    InvalidCheck { id: u16, found: char, expected: char },

    #[error("invalid option")]
    InvalidOption { id: u16 },

    #[error("encoding problem: {message}")]
    EncodingProblem { id: u16, message: String },

    #[error("could not access file '{path}'")]
    FileAccess { id: u16, path: String },

    #[error("could not write file '{path}'")]
    FileWrite { id: u16, path: String },

    #[error("out of memory")]
    Memory { id: u16 },

    #[error("ECI required but not available for this symbology")]
    UsesEci { id: u16 },

    #[error("{message}")]
    Noncompliant { id: u16, message: String },

    #[error("Human Readable Text truncated")]
    HrtTruncated { id: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZintError {
    pub fn id(&self) -> u16 {
        match self {
            ZintError::TooLong { id, .. }
            | ZintError::InvalidData { id, .. }
            | ZintError::InvalidCheck { id, .. }
            | ZintError::InvalidOption { id }
            | ZintError::EncodingProblem { id, .. }
            | ZintError::FileAccess { id, .. }
            | ZintError::FileWrite { id, .. }
            | ZintError::Memory { id }
            | ZintError::UsesEci { id }
            | ZintError::Noncompliant { id, .. }
            | ZintError::HrtTruncated { id } => *id,
            ZintError::Io(_) => 0,
        }
    }

    /// The `"Error NNN: ..."` form the dispatcher prefixes onto a bare message,
    /// matching the original's severity-label convention.
    pub fn display_with_severity(&self) -> String {
        format!("Error {}: {}", self.id(), self)
    }
}

impl Warning {
    pub fn display_with_severity(&self) -> String {
        format!("Warning {}: {}", self.id(), self)
    }
}
