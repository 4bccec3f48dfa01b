use std::time::Duration;
use fbwire::{
    ErrorKind, Result, Transaction, TransactionOptions, TransactionState,
    options::{AccessMode, IsolationLevel, TableLock},
};

use crate::memory::MemoryConnection;

pub fn main() -> Result<()> {
    let mut conn = MemoryConnection::default();

    // defaults of isolation level
    let mut tx = Transaction::new(&mut conn, IsolationLevel::ReadCommitted);
    tx.begin(None)?;
    tx.execute("INSERT INTO POST(NAME) VALUES('foo')")?;
    tx.commit_retaining()?;
    tx.execute("INSERT INTO POST(NAME) VALUES('bar')")?;
    tx.commit()?;
    assert_eq!(tx.state(), TransactionState::Completed);

    let err = tx.commit().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState(_)));
    drop(tx);

    // explicit options and savepoints
    let options = TransactionOptions::new()
        .isolation(IsolationLevel::Snapshot)
        .access(AccessMode::Write)
        .wait(Some(Duration::from_secs(10)))
        .lock_table("POST", TableLock::write().protected());

    let mut tx = Transaction::new(&mut conn, IsolationLevel::Snapshot);
    tx.begin(Some(&options))?;
    tx.save("BEFORE_DELETE")?;
    tx.execute("DELETE FROM POST")?;
    tx.rollback_savepoint("BEFORE_DELETE")?;
    tx.commit_savepoint("BEFORE_DELETE")?;

    let err = tx.save(" ").unwrap_err();
    tracing::info!("{err:#}");
    tx.rollback()?;
    drop(tx);

    // dropped while active
    {
        let mut tx = Transaction::new(&mut conn, "serializable".parse()?);
        tx.begin(None)?;
        tx.execute("UPDATE POST SET NAME = 'baz'")?;
    }

    conn.fail_rollback = true;
    {
        let mut tx = Transaction::new(&mut conn, IsolationLevel::default());
        tx.begin(None)?;
    }

    assert!(conn.active().is_empty());

    Ok(())
}
