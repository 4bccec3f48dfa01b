//! Firebird client core
//!
//! Scalar wire decoding, transaction parameter buffers, and the transaction
//! lifecycle, independent of any particular network transport.
//!
//! # Examples
//!
//! Decoding column values:
//!
//! ```
//! use fbwire::decode::{decode_date, decode_int32, decode_scaled_numeric};
//! use fbwire::firebird::sql_type::SQL_LONG;
//!
//! assert_eq!(decode_int32(&[0, 0, 1, 0]).unwrap(), 256);
//! assert_eq!(decode_date(51_544).unwrap().to_string(), "2000-01-01");
//! assert_eq!(decode_scaled_numeric(12345, -2, SQL_LONG).to_string(), "123.45");
//! ```
//!
//! Running a transaction:
//!
//! ```no_run
//! use fbwire::{Transaction, TransactionOptions, options::{IsolationLevel, TableLock}};
//! use std::time::Duration;
//!
//! # fn app(mut conn: impl fbwire::FbTransport + fbwire::Executor) -> fbwire::Result<()> {
//! let options = TransactionOptions::new()
//!     .isolation(IsolationLevel::Snapshot)
//!     .wait(Some(Duration::from_secs(5)))
//!     .lock_table("ACCOUNT", TableLock::write().protected());
//!
//! let mut tx = Transaction::new(&mut conn, IsolationLevel::Snapshot);
//! tx.begin(Some(&options))?;
//! tx.execute("UPDATE ACCOUNT SET BALANCE = BALANCE - 10 WHERE ID = 1")?;
//! tx.commit()?;
//! # Ok(())
//! # }
//! ```

mod common;
mod ext;

// Protocol
pub mod firebird;

// Encoding
pub mod decode;
pub mod encode;

// Component
pub mod options;
pub mod tpb;
pub mod sql;

// Operation
pub mod transport;
pub mod executor;
pub mod transaction;

mod error;

pub use decode::{FormatError, FromWire};
pub use options::{ConfigError, IsolationLevel, TransactionOptions};
pub use tpb::Tpb;

pub use transport::{FbTransport, ProtocolError, TransactionHandle};
pub use executor::Executor;
pub use transaction::{InvalidStateError, Transaction, TransactionState};
pub use error::{Error, ErrorKind, Result};
