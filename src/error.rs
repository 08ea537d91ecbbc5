//! The `error` module defines the error type shared by all fallible
//! operations of the library.

use std::fmt::{self, Display};

/// The broad category of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// A parameter passed to a constructor or to one of the `evolve*`
    /// methods is out of its documented domain. The operation had no effect.
    InvalidArgument,
    /// An operation was invoked in a state it is not valid in, e.g. querying
    /// the satisfied termination conditions before a run has terminated.
    InvalidState,
    /// A fitness evaluation panicked inside a worker or produced a score
    /// that is not a finite non-negative number. The current run is aborted
    /// and partial results are discarded.
    EvaluatorFailure,
    /// A variation operator violated its contract, e.g. returned an
    /// offspring list of the wrong length.
    OperatorMisuse,
}

/// An error raised by the evolution engine or one of its components.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human readable description of this error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
