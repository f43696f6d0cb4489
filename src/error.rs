//! Unified error type for doctext.
//!
//! This module provides a single error type that covers both the container
//! (CFBF/OLE2) layer and the DOC-specific layers (FIB, piece table, text),
//! presenting a consistent API to callers.
use thiserror::Error;

/// Main error type for doctext operations.
///
/// Exactly the three kinds the core's structural layers can raise: a
/// malformed container/document, a missing stream, or an internally
/// inconsistent structure. There is no separate I/O variant — a failure to
/// read the underlying source while walking a sector chain is itself a
/// structural failure, so `std::io::Error` converts into `DocFormat`.
#[derive(Error, Debug)]
pub enum Error {
    /// The container or document structure itself is malformed: bad OLE2
    /// signature, truncated or corrupt sectors, cyclic sector chains,
    /// out-of-range indices, or an encrypted document.
    #[error("DOC format error: {0}")]
    DocFormat(String),

    /// A required named stream (e.g. `WordDocument`, `1Table`) is absent.
    #[error("missing stream: {0}")]
    MissingStream(String),

    /// A structure was present but internally inconsistent: FIB too short,
    /// CLX/PlcPcd bounds or size mismatches.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::DocFormat(format!("I/O error: {err}"))
    }
}

/// Result type for doctext operations.
pub type Result<T> = std::result::Result<T, Error>;
