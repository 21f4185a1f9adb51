// License: MIT

use std::fmt;

/// An operation was rejected before it touched any state.
///
/// Internal-state conditions (reset at zero, re-arming a gesture) are
/// defined as no-ops, not errors; only user-supplied values land here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The idle timeout must be at least one second.
    ZeroIdleTimeout,

    /// A resume was requested but the ledger has no such entry.
    NothingToResume,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroIdleTimeout =>
                write!(f, "idle timeout must be at least 1 second"),
            Error::NothingToResume =>
                write!(f, "no previous time to resume"),
        }
    }
}

impl std::error::Error for Error {}
