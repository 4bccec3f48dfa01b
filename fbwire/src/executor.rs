//! The [`Executor`] trait.
use crate::transport::{BoxError, TransactionHandle};

/// A type that can execute sql text inside a transaction.
///
/// Savepoints have no wire message of their own, they are plain statements
/// sent through this trait.
pub trait Executor {
    /// Execute statement without result set.
    fn execute(&mut self, handle: TransactionHandle, sql: &str) -> Result<(), BoxError>;
}

impl<E> Executor for &mut E where E: Executor + ?Sized {
    fn execute(&mut self, handle: TransactionHandle, sql: &str) -> Result<(), BoxError> {
        E::execute(self, handle, sql)
    }
}
