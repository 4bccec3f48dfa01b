//! The [`Transaction`] type.
use std::fmt;

use crate::{
    Result,
    common::{span, verbose},
    executor::Executor,
    options::{IsolationLevel, TransactionOptions},
    sql::{Savepoint, SavepointOp},
    tpb::Tpb,
    transport::{FbTransport, ProtocolError, TransactionHandle},
};

/// Lifecycle state of a [`Transaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Created, [`begin`][Transaction::begin] not yet succeeded.
    Uninitialized,
    /// Holding a server handle.
    Active,
    /// Committed or rolled back, terminal.
    Completed,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

/// An RAII implementation of transaction scope.
///
/// To begin a transaction, use [`Transaction::begin`].
///
/// To end it, use [`Transaction::commit`] or [`Transaction::rollback`].
///
/// If still active when this structure is dropped, transaction will be rolled
/// back, ignoring any error.
///
/// # Example
///
/// ```no_run
/// # fn test(mut conn: impl fbwire::FbTransport + fbwire::Executor) -> fbwire::Result<()> {
/// use fbwire::{Transaction, options::IsolationLevel};
///
/// let mut tx = Transaction::new(&mut conn, IsolationLevel::Snapshot);
/// tx.begin(None)?;
///
/// tx.execute("insert into post(name) values('foo')")?;
/// tx.save("before_bar")?;
/// tx.execute("insert into post(name) values('bar')")?;
/// tx.rollback_savepoint("before_bar")?;
///
/// tx.commit()?;
/// # Ok(())
/// # }
/// ```
pub struct Transaction<IO: FbTransport> {
    io: IO,
    isolation: IsolationLevel,
    state: TransactionState,
    handle: Option<TransactionHandle>,
}

impl<IO> Transaction<IO>
where
    IO: FbTransport
{
    /// Create uninitialized transaction on `io`.
    pub fn new(io: IO, isolation: IsolationLevel) -> Self {
        Self { io, isolation, state: TransactionState::Uninitialized, handle: None }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Returns server handle while active.
    pub fn handle(&self) -> Option<TransactionHandle> {
        self.handle
    }

    pub fn isolation_level(&self) -> IsolationLevel {
        self.isolation
    }

    pub fn is_completed(&self) -> bool {
        self.state == TransactionState::Completed
    }

    /// Start the transaction.
    ///
    /// Without `options`, the defaults of the isolation level given in
    /// [`Transaction::new`] are used.
    pub fn begin(&mut self, options: Option<&TransactionOptions>) -> Result<()> {
        span!("begin", isolation = %self.isolation);

        if self.state != TransactionState::Uninitialized {
            return Err(InvalidStateError::new("begin", self.state).into());
        }

        let tpb = match options {
            Some(options) => Tpb::build(options)?,
            None => Tpb::from_isolation(self.isolation),
        };

        verbose!(?tpb, "begin transaction");

        let handle = self
            .io
            .begin_transaction(&tpb)
            .map_err(|e| ProtocolError::new("begin transaction", e))?;

        verbose!(%handle, "transaction active");

        self.handle = Some(handle);
        self.state = TransactionState::Active;
        Ok(())
    }

    /// Commit transaction.
    pub fn commit(&mut self) -> Result<()> {
        let handle = self.active("commit")?;
        self.io.commit(handle).map_err(|e| ProtocolError::new("commit", e))?;
        verbose!(%handle, "transaction committed");
        self.complete(handle);
        Ok(())
    }

    /// Rollback transaction.
    pub fn rollback(&mut self) -> Result<()> {
        let handle = self.active("rollback")?;
        self.io.rollback(handle).map_err(|e| ProtocolError::new("rollback", e))?;
        verbose!(%handle, "transaction rolled back");
        self.complete(handle);
        Ok(())
    }

    /// Commit the work done so far and keep the transaction active.
    pub fn commit_retaining(&mut self) -> Result<()> {
        let handle = self.active("commit retaining")?;
        let retained = self
            .io
            .commit_retaining(handle)
            .map_err(|e| ProtocolError::new("commit retaining", e))?;
        verbose!(%handle, %retained, "transaction commit retained");
        self.handle = Some(retained);
        Ok(())
    }

    /// Rollback the work done so far and keep the transaction active.
    pub fn rollback_retaining(&mut self) -> Result<()> {
        let handle = self.active("rollback retaining")?;
        let retained = self
            .io
            .rollback_retaining(handle)
            .map_err(|e| ProtocolError::new("rollback retaining", e))?;
        verbose!(%handle, %retained, "transaction rollback retained");
        self.handle = Some(retained);
        Ok(())
    }

    fn active(&self, operation: &'static str) -> Result<TransactionHandle, InvalidStateError> {
        match (self.state, self.handle) {
            (TransactionState::Active, Some(handle)) => Ok(handle),
            (state, _) => Err(InvalidStateError::new(operation, state)),
        }
    }

    fn complete(&mut self, handle: TransactionHandle) {
        self.io.transaction_released(handle);
        self.handle = None;
        self.state = TransactionState::Completed;
    }
}

impl<IO> Transaction<IO>
where
    IO: FbTransport + Executor
{
    /// Execute a statement inside this transaction.
    pub fn execute(&mut self, sql: &str) -> Result<()> {
        let handle = self.active("execute")?;
        self.io.execute(handle, sql).map_err(|e| ProtocolError::new("execute", e))?;
        Ok(())
    }

    /// Create savepoint `name`.
    pub fn save(&mut self, name: &str) -> Result<()> {
        self.savepoint(SavepointOp::Save, name)
    }

    /// Release savepoint `name`, keeping its work.
    pub fn commit_savepoint(&mut self, name: &str) -> Result<()> {
        self.savepoint(SavepointOp::Release, name)
    }

    /// Undo the work done since savepoint `name`.
    pub fn rollback_savepoint(&mut self, name: &str) -> Result<()> {
        self.savepoint(SavepointOp::Rollback, name)
    }

    fn savepoint(&mut self, op: SavepointOp, name: &str) -> Result<()> {
        let handle = self.active("savepoint")?;
        let sql = Savepoint::new(name)?.sql(op).to_string();
        verbose!(%handle, %sql, "savepoint");
        self.io
            .execute(handle, &sql)
            .map_err(|e| crate::Error::from(ProtocolError::new("savepoint", e)).with_context(sql))
    }
}

impl<IO> Drop for Transaction<IO>
where
    IO: FbTransport
{
    fn drop(&mut self) {
        if let (TransactionState::Active, Some(handle)) = (self.state, self.handle.take()) {
            verbose!(%handle, "implicit rollback");
            if let Err(_err) = self.io.rollback(handle) {
                #[cfg(feature = "log")]
                log::warn!("implicit rollback of transaction {handle} failed: {_err}");
            }
            self.io.transaction_released(handle);
        }
        self.state = TransactionState::Completed;
    }
}

impl<IO> fmt::Debug for Transaction<IO>
where
    IO: FbTransport
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("isolation", &self.isolation)
            .field("state", &self.state)
            .field("handle", &self.handle)
            .finish()
    }
}

/// An error when a lifecycle operation is invoked outside its required state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidStateError {
    operation: &'static str,
    state: TransactionState,
}

impl InvalidStateError {
    pub(crate) fn new(operation: &'static str, state: TransactionState) -> Self {
        Self { operation, state }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Returns the state observed when operation was rejected.
    pub fn state(&self) -> TransactionState {
        self.state
    }
}

impl std::error::Error for InvalidStateError { }

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} a transaction in {} state", self.operation, self.state)
    }
}

impl fmt::Debug for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
