use fbwire::{Executor, FbTransport, Tpb, TransactionHandle, transport::BoxError};

/// Connection that answers every request locally.
#[derive(Default)]
pub struct MemoryConnection {
    next_handle: u32,
    active: Vec<TransactionHandle>,
    pub fail_rollback: bool,
}

impl MemoryConnection {
    pub fn active(&self) -> &[TransactionHandle] {
        &self.active
    }

    fn allocate(&mut self) -> TransactionHandle {
        self.next_handle += 1;
        let handle = TransactionHandle::new(self.next_handle);
        self.active.push(handle);
        handle
    }

    fn retain(&mut self, handle: TransactionHandle) -> TransactionHandle {
        self.active.retain(|h| *h != handle);
        self.allocate()
    }
}

impl FbTransport for MemoryConnection {
    fn begin_transaction(&mut self, tpb: &Tpb) -> Result<TransactionHandle, BoxError> {
        let handle = self.allocate();
        tracing::info!(%handle, ?tpb, "begin");
        Ok(handle)
    }

    fn commit(&mut self, handle: TransactionHandle) -> Result<(), BoxError> {
        tracing::info!(%handle, "commit");
        Ok(())
    }

    fn rollback(&mut self, handle: TransactionHandle) -> Result<(), BoxError> {
        if self.fail_rollback {
            return Err("connection lost".into());
        }
        tracing::info!(%handle, "rollback");
        Ok(())
    }

    fn commit_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError> {
        let retained = self.retain(handle);
        tracing::info!(%handle, %retained, "commit retaining");
        Ok(retained)
    }

    fn rollback_retaining(&mut self, handle: TransactionHandle) -> Result<TransactionHandle, BoxError> {
        let retained = self.retain(handle);
        tracing::info!(%handle, %retained, "rollback retaining");
        Ok(retained)
    }

    fn transaction_released(&mut self, handle: TransactionHandle) {
        self.active.retain(|h| *h != handle);
    }
}

impl Executor for MemoryConnection {
    fn execute(&mut self, handle: TransactionHandle, sql: &str) -> Result<(), BoxError> {
        tracing::info!(%handle, sql, "execute");
        Ok(())
    }
}
