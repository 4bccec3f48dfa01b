//! The [`FbTransport`] trait.
use std::fmt;

use crate::tpb::Tpb;

/// Error returned by collaborators, kept as is inside [`ProtocolError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server assigned transaction handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionHandle(u32);

impl TransactionHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(itoa::Buffer::new().format(self.0))
    }
}

/// A connection which can send transaction primitives to the server.
///
/// Calls block until the server answers. Network timeouts and retries are
/// the implementor's concern.
pub trait FbTransport {
    /// Send the parameter buffer and return the new transaction handle.
    fn begin_transaction(&mut self, tpb: &Tpb) -> Result<TransactionHandle, BoxError>;

    /// Commit and end the transaction.
    fn commit(&mut self, handle: TransactionHandle) -> Result<(), BoxError>;

    /// Rollback and end the transaction.
    fn rollback(&mut self, handle: TransactionHandle) -> Result<(), BoxError>;

    /// Commit the work done so far, keep the transaction context alive.
    ///
    /// Returns the handle to use from now on.
    fn commit_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError>;

    /// Rollback the work done so far, keep the transaction context alive.
    ///
    /// Returns the handle to use from now on.
    fn rollback_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError>;

    /// The transaction is over, the connection may start another one.
    fn transaction_released(&mut self, handle: TransactionHandle);
}

impl<P> FbTransport for &mut P where P: FbTransport + ?Sized {
    fn begin_transaction(&mut self, tpb: &Tpb) -> Result<TransactionHandle, BoxError> {
        P::begin_transaction(self, tpb)
    }

    fn commit(&mut self, handle: TransactionHandle) -> Result<(), BoxError> {
        P::commit(self, handle)
    }

    fn rollback(&mut self, handle: TransactionHandle) -> Result<(), BoxError> {
        P::rollback(self, handle)
    }

    fn commit_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError> {
        P::commit_retaining(self, handle)
    }

    fn rollback_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError> {
        P::rollback_retaining(self, handle)
    }

    fn transaction_released(&mut self, handle: TransactionHandle) {
        P::transaction_released(self, handle);
    }
}

/// An error reported by the transport or executor.
pub struct ProtocolError {
    operation: &'static str,
    source: BoxError,
}

impl ProtocolError {
    pub(crate) fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self { operation, source: source.into() }
    }

    /// Returns the operation that failed.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.source)
    }
}

impl fmt::Debug for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
