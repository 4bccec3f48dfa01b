//! `fbwire` error types.
use std::{backtrace::Backtrace, fmt};

use crate::{
    decode::FormatError,
    options::ConfigError,
    transaction::InvalidStateError,
    transport::ProtocolError,
};

/// A specialized [`Result`] type for `fbwire` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All possible error from `fbwire` library.
pub struct Error {
    context: String,
    backtrace: Backtrace,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Prefix the error message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// All possible error kind from `fbwire` library.
pub enum ErrorKind {
    /// Malformed wire buffer.
    Format(FormatError),
    /// Invalid transaction options or savepoint name.
    Config(ConfigError),
    /// Operation invoked outside its required transaction state.
    InvalidState(InvalidStateError),
    /// Transport or executor failure.
    Protocol(ProtocolError),
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for Error {
            fn from($pat: $ty) -> Self {
                let backtrace = std::backtrace::Backtrace::capture();
                Self { context: String::new(), backtrace, kind: $body }
            }
        }
    };
}

from!(<ErrorKind>e => e);
from!(<FormatError>e => ErrorKind::Format(e));
from!(<ConfigError>e => ErrorKind::Config(e));
from!(<InvalidStateError>e => ErrorKind::InvalidState(e));
from!(<ProtocolError>e => ErrorKind::Protocol(e));

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Protocol(e) => std::error::Error::source(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.context.is_empty() {
            write!(f, "{}: ", self.context)?;
        }

        fmt::Display::fmt(&self.kind, f)?;

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let mut backtrace = self.backtrace.to_string();
            write!(f, "\n\n")?;
            writeln!(f, "Stack backtrace:")?;
            backtrace.truncate(backtrace.trim_end().len());
            write!(f, "{}", backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl std::error::Error for ErrorKind { }

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => e.fmt(f),
            Self::Config(e) => e.fmt(f),
            Self::InvalidState(e) => e.fmt(f),
            Self::Protocol(e) => e.fmt(f),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
