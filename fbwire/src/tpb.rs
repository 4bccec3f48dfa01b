//! Transaction parameter buffer.
//!
//! The binary block describing isolation, locking, and wait behavior, sent to
//! the server when a transaction begins.
//!
//! Layout is the version tag, then clumplets in this order:
//!
//! 1. consistency, for serializable
//! 2. concurrency, for repeatable read and snapshot
//! 3. wait, followed by lock timeout if any
//! 4. nowait
//! 5. read or write
//! 6. table reservations, in insertion order
//! 7. read committed
//! 8. autocommit
//! 9. rec version or no rec version
//! 10. restart requests
//! 11. no auto undo
//! 12. read consistency
//!
//! A transaction started without options uses [`Tpb::from_isolation`]
//! instead, which is write, nowait, then the isolation flags.
use bytes::{Bytes, BytesMut};
use std::{fmt, time::Duration};

use crate::{
    ext::{BufMutExt, FmtExt, UsizeExt},
    firebird::tpb,
    options::{
        AccessMode, ConfigError, IsolationLevel, LockMode, LockType, RecordVersion,
        TransactionOptions, WaitMode,
    },
};

/// Serialized transaction options.
#[derive(Clone, PartialEq, Eq)]
pub struct Tpb {
    bytes: Bytes,
}

impl Tpb {
    /// Serialize options.
    pub fn build(options: &TransactionOptions) -> Result<Tpb, ConfigError> {
        let mut buf = BytesMut::with_capacity(16);
        buf.put_tag(tpb::VERSION3);

        match options.isolation {
            Some(IsolationLevel::Serializable) => buf.put_tag(tpb::CONSISTENCY),
            Some(IsolationLevel::RepeatableRead | IsolationLevel::Snapshot) => {
                buf.put_tag(tpb::CONCURRENCY)
            }
            _ => {}
        }

        match options.wait {
            Some(WaitMode::Wait { timeout }) => {
                buf.put_tag(tpb::WAIT);
                if let Some(timeout) = timeout {
                    buf.put_tag_i16(tpb::LOCK_TIMEOUT, timeout_secs(timeout)?);
                }
            }
            Some(WaitMode::NoWait) => buf.put_tag(tpb::NOWAIT),
            None => {}
        }

        match options.access {
            Some(AccessMode::Read) => buf.put_tag(tpb::READ),
            Some(AccessMode::Write) => buf.put_tag(tpb::WRITE),
            None => {}
        }

        for (table, lock) in &options.lock_tables {
            let tag = match lock.kind {
                Some(LockType::Read) => tpb::LOCK_READ,
                Some(LockType::Write) => tpb::LOCK_WRITE,
                None => return Err(ConfigError::NoLockType { table: table.clone() }),
            };
            if table.len().to_clumplet_len().is_none() {
                return Err(ConfigError::TableNameTooLong { table: table.clone() });
            }
            buf.put_tag_bytes(tag, table.as_bytes());

            match lock.mode {
                Some(LockMode::Exclusive) => buf.put_tag(tpb::EXCLUSIVE),
                Some(LockMode::Protected) => buf.put_tag(tpb::PROTECTED),
                Some(LockMode::Shared) => buf.put_tag(tpb::SHARED),
                None => {}
            }
        }

        if matches!(
            options.isolation,
            Some(IsolationLevel::ReadCommitted | IsolationLevel::ReadUncommitted)
        ) {
            buf.put_tag(tpb::READ_COMMITTED);
        }

        if options.autocommit {
            buf.put_tag(tpb::AUTOCOMMIT);
        }

        match options.record_version {
            Some(RecordVersion::RecVersion) => buf.put_tag(tpb::REC_VERSION),
            Some(RecordVersion::NoRecVersion) => buf.put_tag(tpb::NO_REC_VERSION),
            None => {}
        }

        if options.restart_requests {
            buf.put_tag(tpb::RESTART_REQUESTS);
        }

        if options.no_auto_undo {
            buf.put_tag(tpb::NO_AUTO_UNDO);
        }

        if options.read_consistency {
            buf.put_tag(tpb::READ_CONSISTENCY);
        }

        Ok(Tpb { bytes: buf.freeze() })
    }

    /// Serialize the defaults of an isolation level.
    pub fn from_isolation(level: IsolationLevel) -> Tpb {
        let mut buf = BytesMut::with_capacity(8);
        buf.put_tag(tpb::VERSION3);
        buf.put_tag(tpb::WRITE);
        buf.put_tag(tpb::NOWAIT);
        match level {
            IsolationLevel::Serializable => buf.put_tag(tpb::CONSISTENCY),
            IsolationLevel::RepeatableRead | IsolationLevel::Snapshot => {
                buf.put_tag(tpb::CONCURRENCY)
            }
            IsolationLevel::ReadCommitted | IsolationLevel::ReadUncommitted => {
                buf.put_tag(tpb::READ_COMMITTED);
                buf.put_tag(tpb::REC_VERSION);
            }
        }
        Tpb { bytes: buf.freeze() }
    }

    /// Returns the encoded buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume self into the encoded buffer.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Tpb {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&TransactionOptions> for Tpb {
    type Error = ConfigError;

    fn try_from(options: &TransactionOptions) -> Result<Self, Self::Error> {
        Tpb::build(options)
    }
}

impl fmt::Debug for Tpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tpb").field(&self.bytes.lossy()).finish()
    }
}

fn timeout_secs(timeout: Duration) -> Result<i16, ConfigError> {
    match i16::try_from(timeout.as_secs()) {
        Ok(secs) if secs >= 1 => Ok(secs),
        _ => Err(ConfigError::WaitTimeout(timeout)),
    }
}
