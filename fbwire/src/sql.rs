//! Savepoint sql generation.
use std::fmt;

use crate::options::ConfigError;

/// Savepoint statement kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SavepointOp {
    /// `SAVEPOINT name`
    Save,
    /// `RELEASE SAVEPOINT name`
    Release,
    /// `ROLLBACK WORK TO SAVEPOINT name`
    Rollback,
}

impl SavepointOp {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Save => "SAVEPOINT ",
            Self::Release => "RELEASE SAVEPOINT ",
            Self::Rollback => "ROLLBACK WORK TO SAVEPOINT ",
        }
    }
}

/// Validated savepoint name.
///
/// The name is used verbatim, quoting is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Savepoint<'a>(&'a str);

impl<'a> Savepoint<'a> {
    /// Returns [`ConfigError::EmptySavepointName`] if name is empty or whitespace.
    pub fn new(name: &'a str) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptySavepointName);
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &'a str {
        self.0
    }

    /// Returns the statement for `op`.
    pub fn sql(&self, op: SavepointOp) -> SavepointSql<'a> {
        SavepointSql { op, name: self.0 }
    }
}

/// [`Display`][fmt::Display] of a savepoint statement.
#[derive(Clone, Copy, Debug)]
pub struct SavepointSql<'a> {
    op: SavepointOp,
    name: &'a str,
}

impl fmt::Display for SavepointSql<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op.prefix())?;
        f.write_str(self.name)
    }
}
