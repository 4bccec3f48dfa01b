//! Transaction configuration.
//!
//! [`TransactionOptions`] describes how the server should run a transaction,
//! it is serialized into a [`Tpb`][crate::tpb::Tpb] when the transaction begins.
use std::{borrow::Cow, fmt, str::FromStr, time::Duration};

/// Consistency contract requested for a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IsolationLevel {
    Serializable,
    RepeatableRead,
    Snapshot,
    #[default]
    ReadCommitted,
    /// The server has no dirty reads, this behaves as [`ReadCommitted`][IsolationLevel::ReadCommitted].
    ReadUncommitted,
}

impl IsolationLevel {
    /// Options used when a transaction begins without explicit options.
    ///
    /// Write access, no wait, plus the isolation flags.
    pub fn options(self) -> TransactionOptions {
        let options = TransactionOptions::new()
            .isolation(self)
            .access(AccessMode::Write)
            .no_wait();
        match self {
            Self::ReadCommitted | Self::ReadUncommitted => {
                options.record_version(RecordVersion::RecVersion)
            }
            Self::Serializable | Self::RepeatableRead | Self::Snapshot => options,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Serializable => "serializable",
            Self::RepeatableRead => "repeatable_read",
            Self::Snapshot => "snapshot",
            Self::ReadCommitted => "read_committed",
            Self::ReadUncommitted => "read_uncommitted",
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IsolationLevel {
    type Err = ConfigError;

    /// Case insensitive, `_`, `-` and space separators are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "serializable" => Ok(Self::Serializable),
            "repeatableread" => Ok(Self::RepeatableRead),
            "snapshot" => Ok(Self::Snapshot),
            "readcommitted" => Ok(Self::ReadCommitted),
            "readuncommitted" => Ok(Self::ReadUncommitted),
            _ => Err(ConfigError::UnknownIsolation(s.to_owned())),
        }
    }
}

/// Transaction access mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AccessMode {
    Read,
    Write,
}

/// Behavior on lock conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WaitMode {
    /// Wait for the conflicting transaction, optionally up to `timeout`.
    Wait { timeout: Option<Duration> },
    /// Fail immediately.
    NoWait,
}

/// Read committed record version behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordVersion {
    /// Read the latest committed version.
    RecVersion,
    /// Wait or fail when the latest version is uncommitted.
    NoRecVersion,
}

/// Table reservation lock type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LockType {
    Read,
    Write,
}

/// Table reservation exclusivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LockMode {
    Exclusive,
    Protected,
    Shared,
}

/// Table reservation.
///
/// A lock without [`LockType`] is rejected when the transaction begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableLock {
    pub(crate) kind: Option<LockType>,
    pub(crate) mode: Option<LockMode>,
}

impl TableLock {
    /// Shared read reservation.
    pub const fn read() -> Self {
        Self { kind: Some(LockType::Read), mode: None }
    }

    /// Write reservation.
    pub const fn write() -> Self {
        Self { kind: Some(LockType::Write), mode: None }
    }

    /// Set exclusivity.
    pub const fn mode(mut self, mode: LockMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub const fn exclusive(self) -> Self {
        self.mode(LockMode::Exclusive)
    }

    pub const fn protected(self) -> Self {
        self.mode(LockMode::Protected)
    }

    pub const fn shared(self) -> Self {
        self.mode(LockMode::Shared)
    }

    pub const fn lock_type(&self) -> Option<LockType> {
        self.kind
    }

    pub const fn lock_mode(&self) -> Option<LockMode> {
        self.mode
    }
}

/// Transaction options builder.
///
/// Only what is set here is sent to the server, use
/// [`IsolationLevel::options`] for a complete starting point.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fbwire::options::{IsolationLevel, TableLock, TransactionOptions};
///
/// let options = IsolationLevel::Snapshot
///     .options()
///     .wait(Some(Duration::from_secs(5)))
///     .lock_table("EMPLOYEE", TableLock::write().protected());
///
/// assert_eq!(options.isolation_level(), Some(IsolationLevel::Snapshot));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransactionOptions {
    pub(crate) isolation: Option<IsolationLevel>,
    pub(crate) access: Option<AccessMode>,
    pub(crate) wait: Option<WaitMode>,
    pub(crate) autocommit: bool,
    pub(crate) record_version: Option<RecordVersion>,
    pub(crate) restart_requests: bool,
    pub(crate) no_auto_undo: bool,
    pub(crate) read_consistency: bool,
    pub(crate) lock_tables: Vec<(String, TableLock)>,
}

impl TransactionOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isolation(mut self, level: IsolationLevel) -> Self {
        self.isolation = Some(level);
        self
    }

    pub fn access(mut self, mode: AccessMode) -> Self {
        self.access = Some(mode);
        self
    }

    /// Wait on lock conflict.
    ///
    /// The timeout is sent in whole seconds, it must be between 1 and
    /// [`i16::MAX`] seconds. Fractional seconds are truncated, so `1.9s` is
    /// sent as `1` and anything below one second is rejected.
    pub fn wait(mut self, timeout: Option<Duration>) -> Self {
        self.wait = Some(WaitMode::Wait { timeout });
        self
    }

    /// Fail immediately on lock conflict.
    pub fn no_wait(mut self) -> Self {
        self.wait = Some(WaitMode::NoWait);
        self
    }

    pub fn autocommit(mut self, value: bool) -> Self {
        self.autocommit = value;
        self
    }

    pub fn record_version(mut self, value: RecordVersion) -> Self {
        self.record_version = Some(value);
        self
    }

    pub fn restart_requests(mut self, value: bool) -> Self {
        self.restart_requests = value;
        self
    }

    pub fn no_auto_undo(mut self, value: bool) -> Self {
        self.no_auto_undo = value;
        self
    }

    pub fn read_consistency(mut self, value: bool) -> Self {
        self.read_consistency = value;
        self
    }

    /// Reserve a table.
    ///
    /// Tables are sent in insertion order, locking the same table again
    /// replaces the previous reservation in place.
    pub fn lock_table(mut self, table: impl Into<String>, lock: TableLock) -> Self {
        let table = table.into();
        match self.lock_tables.iter_mut().find(|(name, _)| *name == table) {
            Some((_, prev)) => *prev = lock,
            None => self.lock_tables.push((table, lock)),
        }
        self
    }

    pub fn isolation_level(&self) -> Option<IsolationLevel> {
        self.isolation
    }

    pub fn wait_mode(&self) -> Option<WaitMode> {
        self.wait
    }

    /// Returns table reservations in the order they are sent.
    pub fn lock_tables(&self) -> impl Iterator<Item = (&str, &TableLock)> {
        self.lock_tables.iter().map(|(name, lock)| (name.as_str(), lock))
    }
}

/// An error when transaction configuration is invalid.
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Table reservation specify neither read nor write.
    NoLockType { table: String },
    /// Table name does not fit one byte length.
    TableNameTooLong { table: String },
    /// Wait timeout outside 1 to 32767 seconds.
    WaitTimeout(Duration),
    /// Savepoint name is empty or whitespace.
    EmptySavepointName,
    /// Unrecognized isolation level name.
    UnknownIsolation(String),
}

impl ConfigError {
    fn reason(&self) -> Cow<'static, str> {
        match self {
            Self::NoLockType { table } => {
                format!("lock on table {table:?} must be either read or write").into()
            }
            Self::TableNameTooLong { table } => {
                format!("table name {table:?} is longer than 255 bytes").into()
            }
            Self::WaitTimeout(timeout) => {
                format!("wait timeout {timeout:?} must be between 1 and 32767 seconds").into()
            }
            Self::EmptySavepointName => "savepoint name must not be empty".into(),
            Self::UnknownIsolation(name) => format!("unknown isolation level {name:?}").into(),
        }
    }
}

impl std::error::Error for ConfigError { }

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f.write_str(&self.reason())
        }
        write!(f, "invalid transaction configuration: {}", self.reason())
    }
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn isolation_defaults() {
        let rc = IsolationLevel::ReadCommitted.options();
        assert_eq!(rc.access, Some(AccessMode::Write));
        assert_eq!(rc.wait, Some(WaitMode::NoWait));
        assert_eq!(rc.record_version, Some(RecordVersion::RecVersion));

        let snapshot = IsolationLevel::Snapshot.options();
        assert_eq!(snapshot.isolation, Some(IsolationLevel::Snapshot));
        assert_eq!(snapshot.record_version, None);

        assert_eq!(IsolationLevel::default(), IsolationLevel::ReadCommitted);
    }

    #[test]
    fn parse_isolation() {
        assert_eq!("serializable".parse(), Ok(IsolationLevel::Serializable));
        assert_eq!("Repeatable-Read".parse(), Ok(IsolationLevel::RepeatableRead));
        assert_eq!("READ COMMITTED".parse(), Ok(IsolationLevel::ReadCommitted));
        assert_eq!("read_uncommitted".parse(), Ok(IsolationLevel::ReadUncommitted));
        assert_eq!(
            "chaos".parse::<IsolationLevel>(),
            Err(ConfigError::UnknownIsolation("chaos".into())),
        );
    }

    #[test]
    fn display_roundtrip() {
        for level in [
            IsolationLevel::Serializable,
            IsolationLevel::RepeatableRead,
            IsolationLevel::Snapshot,
            IsolationLevel::ReadCommitted,
            IsolationLevel::ReadUncommitted,
        ] {
            assert_eq!(level.to_string().parse(), Ok(level));
        }
    }

    #[test]
    fn lock_table_keeps_insertion_order() {
        let options = TransactionOptions::new()
            .lock_table("B", TableLock::read())
            .lock_table("A", TableLock::write())
            .lock_table("B", TableLock::write().exclusive());
        let tables: Vec<_> = options.lock_tables().collect();
        assert_eq!(
            tables,
            [("B", &TableLock::write().exclusive()), ("A", &TableLock::write())],
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::NoLockType { table: "EMP".into() };
        assert_eq!(
            err.to_string(),
            "invalid transaction configuration: lock on table \"EMP\" must be either read or write",
        );
        assert_eq!(format!("{err:#}"), "lock on table \"EMP\" must be either read or write");
    }
}
